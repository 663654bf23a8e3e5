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

//! Error taxonomy for configuration, property coercion, cloning and delivery.

use crate::keyed_router::RouterState;
use thiserror::Error;

/// Failures that prevent a router or a configured setup from becoming usable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("router '{router}' requires a layout")]
    MissingLayout { router: String },
    #[error("router '{router}' requires a property_name (e.g. 'path')")]
    MissingPropertyName { router: String },
    #[error("router '{router}' requires a template sink (e.g. use sink_ref in the configuration)")]
    MissingTemplate { router: String },
    #[error(
        "router '{router}' already has template '{existing}' attached; only one template sink is allowed"
    )]
    TemplateAlreadyAttached { router: String, existing: String },
    #[error("router '{router}' is {state} and can no longer be configured")]
    NotConfigurable { router: String, state: RouterState },
    #[error("unknown sink kind '{0}'")]
    UnknownSinkKind(String),
    #[error("sink reference '{0}' does not name a configured sink")]
    UnknownSinkRef(String),
    #[error("name '{0}' is configured more than once")]
    DuplicateName(String),
    #[error("root '{0}' does not name a configured router or sink")]
    UnknownRoot(String),
    #[error("invalid level '{0}'")]
    InvalidLevel(String),
    #[error("invalid property on sink '{sink}': {source}")]
    Property {
        sink: String,
        #[source]
        source: PropertyError,
    },
    #[error("sink '{sink}' failed to activate: {source}")]
    Activation {
        sink: String,
        #[source]
        source: SinkError,
    },
    #[error("unable to read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse configuration: {0}")]
    Parse(String),
}

/// Failures while reading or writing a named sink property.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    #[error("no property named '{name}' on sink of type {sink_type}")]
    Unknown {
        sink_type: &'static str,
        name: String,
    },
    #[error("property '{name}' on sink of type {sink_type} is read-only")]
    ReadOnly {
        sink_type: &'static str,
        name: String,
    },
    #[error("property '{name}' expects {expected}, got '{value}'")]
    InvalidValue {
        name: String,
        expected: String,
        value: String,
    },
}

/// Failures while building a per-key copy of a template sink.
#[derive(Debug, Error)]
pub enum CloneError {
    #[error("cannot create new {sink_type}: {source}")]
    Construct {
        sink_type: &'static str,
        #[source]
        source: SinkError,
    },
    #[error("cannot transfer properties onto new {sink_type}: {source}")]
    Property {
        sink_type: &'static str,
        #[source]
        source: PropertyError,
    },
    #[error("cannot activate new {sink_type}: {source}")]
    Activate {
        sink_type: &'static str,
        #[source]
        source: SinkError,
    },
}

/// Failures raised by a sink while activating or accepting an event.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O failure on sink '{sink}': {source}")]
    Io {
        sink: String,
        #[source]
        source: std::io::Error,
    },
    #[error("sink '{sink}' requires option '{option}'")]
    MissingOption { sink: String, option: &'static str },
    #[error("sink '{0}' has not been activated")]
    NotActivated(String),
    #[error("sink '{0}' is closed")]
    Closed(String),
    #[error("router '{router}' is not active (state: {state})")]
    RouterNotActive { router: String, state: RouterState },
    #[error("sink of type {0} cannot be default-constructed")]
    NoDefaultInstance(&'static str),
}
