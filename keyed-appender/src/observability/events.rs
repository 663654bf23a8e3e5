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

//! Canonical structured event names used across `keyed-appender`.

// Router lifecycle events.
pub const ROUTER_ACTIVATE_OK: &str = "router_activate_ok";
pub const ROUTER_ACTIVATE_FAILED: &str = "router_activate_failed";
pub const ROUTER_TEMPLATE_ATTACH: &str = "router_template_attach";
pub const ROUTER_TEMPLATE_REJECTED: &str = "router_template_rejected";
pub const ROUTER_CLOSE: &str = "router_close";
pub const ROUTER_EVENT_DROPPED: &str = "router_event_dropped";
pub const ROUTER_DESTINATION_BUILD: &str = "router_destination_build";

// Cloner events.
pub const CLONER_COMPUTE: &str = "cloner_compute";
pub const CLONER_PROPERTY_MISSING: &str = "cloner_property_missing";
pub const CLONE_CREATE_OK: &str = "clone_create_ok";
pub const CLONE_CREATE_FAILED: &str = "clone_create_failed";

// Destination cache events.
pub const DESTINATION_INSERT: &str = "destination_insert";
pub const DESTINATION_CANDIDATE_DISCARDED: &str = "destination_candidate_discarded";

// Collaborator events.
pub const SUBSTITUTION_UNTERMINATED: &str = "substitution_unterminated";
pub const SINK_CLOSE: &str = "sink_close";
pub const SINK_FLUSH_FAILED: &str = "sink_flush_failed";
pub const LAYOUT_WIDTH_CLAMPED: &str = "layout_width_clamped";
pub const BRIDGE_APPEND_FAILED: &str = "bridge_append_failed";

// Configuration events.
pub const SETUP_SINK_BUILT: &str = "setup_sink_built";
pub const SETUP_ROUTER_BUILT: &str = "setup_router_built";
pub const SETUP_SHUTDOWN: &str = "setup_shutdown";
