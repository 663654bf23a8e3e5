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

//! Standard output / standard error sink.

use super::property::{self, PropertyDescriptor, PropertyValue};
use super::{ConfigurableSink, Sink};
use crate::error::{PropertyError, SinkError};
use crate::event::LogEvent;
use crate::layout::Layout;
use log::LevelFilter;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const SINK_TYPE: &str = "ConsoleSink";
const DEFAULT_NAME: &str = "console";
const TARGET_STDOUT: &str = "stdout";
const TARGET_STDERR: &str = "stderr";
const TARGET_CHOICES: &[&str] = &[TARGET_STDOUT, TARGET_STDERR];

const PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor::read_write("name"),
    PropertyDescriptor::read_write("target"),
    PropertyDescriptor::read_write("threshold"),
];

/// Writes formatted events to `stdout` (default) or `stderr`.
pub struct ConsoleSink {
    name: String,
    target: &'static str,
    threshold: LevelFilter,
    layout: Option<Arc<dyn Layout>>,
    closed: AtomicBool,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            target: TARGET_STDOUT,
            threshold: LevelFilter::Trace,
            layout: None,
            closed: AtomicBool::new(false),
        }
    }
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn append(&self, event: &LogEvent) -> Result<(), SinkError> {
        if event.level() > self.threshold {
            return Ok(());
        }
        if self.closed.load(Ordering::Acquire) {
            return Err(SinkError::Closed(self.name.clone()));
        }

        let rendered = match &self.layout {
            Some(layout) => layout.format(event),
            None => format!("{}\n", event.message()),
        };
        let written = if self.target == TARGET_STDERR {
            std::io::stderr().lock().write_all(rendered.as_bytes())
        } else {
            std::io::stdout().lock().write_all(rendered.as_bytes())
        };
        written.map_err(|source| SinkError::Io {
            sink: self.name.clone(),
            source,
        })
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

impl ConfigurableSink for ConsoleSink {
    fn sink_type(&self) -> &'static str {
        SINK_TYPE
    }

    fn properties(&self) -> &'static [PropertyDescriptor] {
        PROPERTIES
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "name" => Some(PropertyValue::Text(self.name.clone())),
            "target" => Some(PropertyValue::Choice(self.target)),
            "threshold" => Some(PropertyValue::Choice(self.threshold.as_str())),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        let descriptor = property::find_writable(PROPERTIES, SINK_TYPE, name)?;
        match descriptor.name {
            "name" => self.name = value.to_string(),
            "target" => self.target = property::parse_choice(name, value, TARGET_CHOICES)?,
            "threshold" => self.threshold = property::parse_level(name, value)?,
            _ => {}
        }
        Ok(())
    }

    fn layout(&self) -> Option<Arc<dyn Layout>> {
        self.layout.clone()
    }

    fn set_layout(&mut self, layout: Arc<dyn Layout>) {
        self.layout = Some(layout);
    }

    fn new_instance(&self) -> Result<Box<dyn ConfigurableSink>, SinkError> {
        Ok(Box::new(ConsoleSink::default()))
    }

    fn activate(&mut self) -> Result<(), SinkError> {
        *self.closed.get_mut() = false;
        Ok(())
    }
}
