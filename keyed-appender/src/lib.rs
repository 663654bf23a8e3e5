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

//! # keyed-appender
//!
//! `keyed-appender` routes log events to per-context destinations. A [`KeyedRouter`]
//! holds one template sink; the first event seen under a given diagnostic context gets
//! its own copy of that template with one property (typically the file `path`)
//! replaced by the router layout's output for the event. Later events under the same
//! context reuse that copy. Events without a context go to the template.
//!
//! ```
//! use keyed_appender::{
//!     ndc, ConfigurableSink, FileSink, KeyedRouter, LogEvent, PatternLayout, Sink,
//! };
//! use std::sync::Arc;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let root = dir.path().display().to_string();
//!
//! let mut template = FileSink::new();
//! template.set_property("path", &format!("{root}/default.log")).unwrap();
//! template.set_layout(Arc::new(PatternLayout::new("%-5p %m%n")));
//! template.activate().unwrap();
//!
//! let mut router = KeyedRouter::new("DISPATCH");
//! router.set_property_name("path").unwrap();
//! router
//!     .set_layout(Arc::new(PatternLayout::new(format!("{root}/%x.log"))))
//!     .unwrap();
//! router.add_sink(Arc::new(template)).unwrap();
//! router.activate().unwrap();
//!
//! {
//!     let _session = ndc::push("session-42");
//!     router
//!         .append(&LogEvent::capture(log::Level::Info, "demo", "routed"))
//!         .unwrap();
//! }
//! router
//!     .append(&LogEvent::capture(log::Level::Info, "demo", "unkeyed"))
//!     .unwrap();
//!
//! assert_eq!(router.destination_keys(), vec!["session-42"]);
//! ```
//!
//! ## Configuration
//!
//! [`Config`] reads a JSON5 file naming sinks, routers and the root; [`LoggingSetup`]
//! builds and activates them, and [`KeyedLogger`] plugs the root into the `log`
//! facade.
//!
//! ## Observability model
//!
//! Library code emits `tracing` events and never installs a global subscriber.
//! Binaries and tests initialise `tracing_subscriber` once at process boundaries.

mod config;
pub use config::{Config, ConfigValue, LayoutConfig, LoggingSetup, RouterConfig, SinkConfig};

mod diagnostic_context;
pub use diagnostic_context::DiagnosticContext;

mod error;
pub use error::{CloneError, ConfigError, PropertyError, SinkError};

mod event;
pub use event::LogEvent;

mod keyed_router;
pub use keyed_router::{KeyedRouter, RouterState};

mod layout;
pub use layout::{Layout, LevelPatternLayout, PatternLayout};

mod log_bridge;
pub use log_bridge::KeyedLogger;

pub mod ndc;

#[doc(hidden)]
pub mod observability;

mod routing;
pub use routing::destination_cache::{CachePolicy, DestinationCache};
pub use routing::sink_cloner::{verify_property, SinkCloner};

mod sink;
pub use sink::property::{PropertyDescriptor, PropertyValue};
pub use sink::{ConfigurableSink, ConsoleSink, FileSink, Sink, SinkConstructor, SinkRegistry};

mod substitution;
pub use substitution::{EnvSubstitutor, MapSubstitutor, Substitutor};

#[cfg(test)]
mod test_support;
