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

//! In-crate sink double with string-settable properties.

use crate::error::{PropertyError, SinkError};
use crate::event::LogEvent;
use crate::layout::Layout;
use crate::sink::property::{self, PropertyDescriptor, PropertyValue};
use crate::sink::{ConfigurableSink, Sink};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const SINK_TYPE: &str = "RecordingSink";

const PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor::read_write("name"),
    PropertyDescriptor::read_write("key"),
    PropertyDescriptor::read_write("level"),
    PropertyDescriptor::read_write("fail_activation"),
    PropertyDescriptor::read_only("activated"),
    PropertyDescriptor::read_only("appended"),
];

pub(crate) struct RecordingSink {
    name: String,
    key: Option<String>,
    level: Option<i64>,
    fail_activation: bool,
    fail_construction: bool,
    activated: bool,
    layout: Option<Arc<dyn Layout>>,
    messages: Mutex<Vec<String>>,
    closed: AtomicBool,
}

impl RecordingSink {
    pub(crate) fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            key: None,
            level: None,
            fail_activation: false,
            fail_construction: false,
            activated: false,
            layout: None,
            messages: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Makes `new_instance` fail, as for a type without a default constructor.
    pub(crate) fn fail_construction(&mut self) {
        self.fail_construction = true;
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Sink for RecordingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn append(&self, event: &LogEvent) -> Result<(), SinkError> {
        if self.is_closed() {
            return Err(SinkError::Closed(self.name.clone()));
        }
        self.messages.lock().push(event.message().to_string());
        Ok(())
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

impl ConfigurableSink for RecordingSink {
    fn sink_type(&self) -> &'static str {
        SINK_TYPE
    }

    fn properties(&self) -> &'static [PropertyDescriptor] {
        PROPERTIES
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "name" => Some(PropertyValue::Text(self.name.clone())),
            "key" => self.key.clone().map(PropertyValue::Text),
            "level" => self.level.map(PropertyValue::Integer),
            "fail_activation" => Some(PropertyValue::Bool(self.fail_activation)),
            "activated" => Some(PropertyValue::Bool(self.activated)),
            "appended" => Some(PropertyValue::Integer(self.messages.lock().len() as i64)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        let descriptor = property::find_writable(PROPERTIES, SINK_TYPE, name)?;
        match descriptor.name {
            "name" => self.name = value.to_string(),
            "key" => self.key = Some(value.to_string()),
            "level" => self.level = Some(property::parse_integer(name, value)?),
            "fail_activation" => self.fail_activation = property::parse_bool(name, value)?,
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
        if self.fail_construction {
            return Err(SinkError::NoDefaultInstance(SINK_TYPE));
        }
        Ok(Box::new(RecordingSink::named("recording")))
    }

    fn activate(&mut self) -> Result<(), SinkError> {
        if self.fail_activation {
            return Err(SinkError::MissingOption {
                sink: self.name.clone(),
                option: "fail_activation",
            });
        }
        self.activated = true;
        Ok(())
    }
}
