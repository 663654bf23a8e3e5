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

//! Event formatting.
//!
//! A [`Layout`] turns an event into a string. Sinks use one to render the lines they
//! write, and the router uses one as its key formatter to compute per-key override
//! values such as file paths.

mod level_pattern;
mod pattern;

pub use level_pattern::LevelPatternLayout;
pub use pattern::PatternLayout;

use crate::event::LogEvent;
use std::fmt::Debug;

pub trait Layout: Debug + Send + Sync {
    fn format(&self, event: &LogEvent) -> String;
}
