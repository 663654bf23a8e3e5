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

//! Sink capabilities and the concrete sinks shipped with the crate.
//!
//! [`Sink`] is the delivery surface every destination offers. [`ConfigurableSink`] adds
//! the runtime-introspectable configuration surface the router needs to stamp out
//! per-key copies of a template: enumerable string-settable properties, default
//! construction of the same concrete type and a post-configuration activation hook.

mod console_sink;
mod file_sink;
pub mod property;
mod registry;

pub use console_sink::ConsoleSink;
pub use file_sink::FileSink;
pub use registry::{SinkConstructor, SinkRegistry};

use crate::error::{PropertyError, SinkError};
use crate::event::LogEvent;
use crate::layout::Layout;
use property::{PropertyDescriptor, PropertyValue};
use std::sync::Arc;

/// A destination that accepts structured events.
pub trait Sink: Send + Sync {
    fn name(&self) -> &str;

    /// Delivers one event. Failures belong to the sink; callers do not retry.
    fn append(&self, event: &LogEvent) -> Result<(), SinkError>;

    /// Releases held resources. Must be idempotent.
    fn close(&self);
}

/// A sink whose configuration can be enumerated and copied onto a fresh instance.
pub trait ConfigurableSink: Sink {
    /// Concrete type name used in diagnostics.
    fn sink_type(&self) -> &'static str;

    /// Every configuration property this sink type declares.
    fn properties(&self) -> &'static [PropertyDescriptor];

    /// Current value of a readable property, `None` when unset or not readable.
    fn property(&self, name: &str) -> Option<PropertyValue>;

    /// Coerces `value` into the property's declared type and stores it.
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), PropertyError>;

    fn layout(&self) -> Option<Arc<dyn Layout>>;

    fn set_layout(&mut self, layout: Arc<dyn Layout>);

    /// Builds an unconfigured, unactivated instance of the same concrete type.
    fn new_instance(&self) -> Result<Box<dyn ConfigurableSink>, SinkError>;

    /// Finalises configuration, e.g. opens the underlying file.
    fn activate(&mut self) -> Result<(), SinkError>;

    /// Readable, writable properties that currently hold a value.
    fn list_properties(&self) -> Vec<(&'static str, PropertyValue)> {
        self.properties()
            .iter()
            .filter(|descriptor| descriptor.is_transferable())
            .filter_map(|descriptor| {
                self.property(descriptor.name)
                    .map(|value| (descriptor.name, value))
            })
            .collect()
    }

    fn has_writable_property(&self, name: &str) -> bool {
        self.properties()
            .iter()
            .any(|descriptor| descriptor.name == name && descriptor.writable)
    }
}

impl<T: Sink + ?Sized> Sink for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn append(&self, event: &LogEvent) -> Result<(), SinkError> {
        (**self).append(event)
    }

    fn close(&self) {
        (**self).close()
    }
}
