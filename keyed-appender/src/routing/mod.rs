/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Routing layer.
//!
//! Holds the prototype cloner that stamps out per-key destinations and the
//! concurrent cache that binds each routing key to its destination.

pub(crate) mod destination_cache;
pub(crate) mod sink_cloner;
