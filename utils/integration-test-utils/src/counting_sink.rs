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

use keyed_appender::{
    ConfigurableSink, Layout, LogEvent, PropertyDescriptor, PropertyError, PropertyValue, Sink,
    SinkError,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const SINK_TYPE: &str = "CountingSink";

const PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor::read_write("name"),
    PropertyDescriptor::read_write("key"),
    PropertyDescriptor::read_write("activation_delay_ms"),
];

/// Counters shared by a [`CountingSink`] template and every instance built from it.
#[derive(Debug, Default)]
pub struct SinkStats {
    constructions: AtomicUsize,
    activations: AtomicUsize,
    closes: AtomicUsize,
    delivered: Mutex<Vec<(String, String)>>,
}

impl SinkStats {
    /// Instances created through `new_instance`, i.e. excluding the template.
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// `(key, message)` pairs in delivery order across all instances.
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered.lock().clone()
    }
}

/// Sink double whose `key` property records where each event landed.
///
/// `activation_delay_ms` makes activation sleep, widening the window in which
/// concurrent first events for one key race each other.
pub struct CountingSink {
    name: String,
    key: Option<String>,
    activation_delay_ms: i64,
    layout: Option<Arc<dyn Layout>>,
    closed: AtomicBool,
    stats: Arc<SinkStats>,
}

impl CountingSink {
    pub fn new(name: &str) -> Self {
        Self::with_stats(name, Arc::new(SinkStats::default()))
    }

    fn with_stats(name: &str, stats: Arc<SinkStats>) -> Self {
        Self {
            name: name.to_string(),
            key: None,
            activation_delay_ms: 0,
            layout: None,
            closed: AtomicBool::new(false),
            stats,
        }
    }

    pub fn stats(&self) -> Arc<SinkStats> {
        self.stats.clone()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl Sink for CountingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn append(&self, event: &LogEvent) -> Result<(), SinkError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(SinkError::Closed(self.name.clone()));
        }
        let key = self.key.clone().unwrap_or_default();
        self.stats
            .delivered
            .lock()
            .push((key, event.message().to_string()));
        Ok(())
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.stats.closes.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl ConfigurableSink for CountingSink {
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
            "activation_delay_ms" => Some(PropertyValue::Integer(self.activation_delay_ms)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        match name {
            "name" => self.name = value.to_string(),
            "key" => self.key = Some(value.to_string()),
            "activation_delay_ms" => {
                self.activation_delay_ms =
                    value
                        .trim()
                        .parse()
                        .map_err(|_| PropertyError::InvalidValue {
                            name: name.to_string(),
                            expected: "an integer".to_string(),
                            value: value.to_string(),
                        })?
            }
            _ => {
                return Err(PropertyError::Unknown {
                    sink_type: SINK_TYPE,
                    name: name.to_string(),
                })
            }
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
        self.stats.constructions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingSink::with_stats(
            SINK_TYPE,
            self.stats.clone(),
        )))
    }

    fn activate(&mut self) -> Result<(), SinkError> {
        if self.activation_delay_ms > 0 {
            thread::sleep(Duration::from_millis(self.activation_delay_ms as u64));
        }
        self.stats.activations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
