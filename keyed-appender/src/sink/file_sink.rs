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

//! File-writing sink.

use super::property::{self, PropertyDescriptor, PropertyValue};
use super::{ConfigurableSink, Sink};
use crate::error::{PropertyError, SinkError};
use crate::event::LogEvent;
use crate::layout::Layout;
use crate::observability::events;
use log::LevelFilter;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "file_sink";
const SINK_TYPE: &str = "FileSink";
const DEFAULT_NAME: &str = "file";
const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

const PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor::read_write("name"),
    PropertyDescriptor::read_write("path"),
    PropertyDescriptor::read_write("append"),
    PropertyDescriptor::read_write("immediate_flush"),
    PropertyDescriptor::read_write("buffer_size"),
    PropertyDescriptor::read_write("threshold"),
];

/// Appends formatted events to a file.
///
/// | Property          | Type                 | Default |
/// |-------------------|----------------------|---------|
/// | `name`            | string               | `file`  |
/// | `path`            | string, required     |         |
/// | `append`          | boolean              | `true`  |
/// | `immediate_flush` | boolean              | `true`  |
/// | `buffer_size`     | integer, bytes       | `8192`  |
/// | `threshold`       | `OFF`..`TRACE`       | `TRACE` |
///
/// [`activate`](ConfigurableSink::activate) creates missing parent directories and opens
/// the file. Without a layout each event is written as its message plus a newline.
pub struct FileSink {
    name: String,
    path: Option<String>,
    append: bool,
    immediate_flush: bool,
    buffer_size: usize,
    threshold: LevelFilter,
    layout: Option<Arc<dyn Layout>>,
    writer: Mutex<Option<BufWriter<File>>>,
    closed: AtomicBool,
}

impl Default for FileSink {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            path: None,
            append: true,
            immediate_flush: true,
            buffer_size: DEFAULT_BUFFER_SIZE,
            threshold: LevelFilter::Trace,
            layout: None,
            writer: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }
}

impl FileSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn io_error(&self, source: std::io::Error) -> SinkError {
        SinkError::Io {
            sink: self.name.clone(),
            source,
        }
    }
}

impl Sink for FileSink {
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

        let mut writer = self.writer.lock();
        let writer = writer
            .as_mut()
            .ok_or_else(|| SinkError::NotActivated(self.name.clone()))?;
        writer
            .write_all(rendered.as_bytes())
            .map_err(|err| self.io_error(err))?;
        if self.immediate_flush {
            writer.flush().map_err(|err| self.io_error(err))?;
        }
        Ok(())
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(mut writer) = self.writer.lock().take() {
            if let Err(err) = writer.flush() {
                warn!(
                    event = events::SINK_FLUSH_FAILED,
                    component = COMPONENT,
                    sink = self.name.as_str(),
                    path = self.path.as_deref().unwrap_or_default(),
                    err = %err,
                    "unable to flush buffered output on close"
                );
            }
        }
        debug!(
            event = events::SINK_CLOSE,
            component = COMPONENT,
            sink = self.name.as_str(),
            path = self.path.as_deref().unwrap_or_default(),
            "closed file sink"
        );
    }
}

impl ConfigurableSink for FileSink {
    fn sink_type(&self) -> &'static str {
        SINK_TYPE
    }

    fn properties(&self) -> &'static [PropertyDescriptor] {
        PROPERTIES
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "name" => Some(PropertyValue::Text(self.name.clone())),
            "path" => self.path.clone().map(PropertyValue::Text),
            "append" => Some(PropertyValue::Bool(self.append)),
            "immediate_flush" => Some(PropertyValue::Bool(self.immediate_flush)),
            "buffer_size" => Some(PropertyValue::Integer(self.buffer_size as i64)),
            "threshold" => Some(PropertyValue::Choice(self.threshold.as_str())),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        let descriptor = property::find_writable(PROPERTIES, SINK_TYPE, name)?;
        match descriptor.name {
            "name" => self.name = value.to_string(),
            "path" => self.path = Some(value.to_string()),
            "append" => self.append = property::parse_bool(name, value)?,
            "immediate_flush" => self.immediate_flush = property::parse_bool(name, value)?,
            "buffer_size" => {
                let size = property::parse_integer(name, value)?;
                self.buffer_size = usize::try_from(size)
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| PropertyError::InvalidValue {
                        name: name.to_string(),
                        expected: "a positive integer".to_string(),
                        value: value.to_string(),
                    })?;
            }
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
        Ok(Box::new(FileSink::default()))
    }

    fn activate(&mut self) -> Result<(), SinkError> {
        let path = self.path.clone().ok_or_else(|| SinkError::MissingOption {
            sink: self.name.clone(),
            option: "path",
        })?;

        if let Some(parent) = Path::new(&path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(self.append)
            .truncate(!self.append)
            .open(&path)
            .map_err(|err| self.io_error(err))?;

        *self.writer.get_mut() = Some(BufWriter::with_capacity(self.buffer_size, file));
        *self.closed.get_mut() = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FileSink;
    use crate::error::SinkError;
    use crate::{ConfigurableSink, LogEvent, PatternLayout, PropertyValue, Sink};
    use log::Level;
    use std::fs;
    use std::sync::Arc;
    use tracing_test::traced_test;

    fn configured(path: &str) -> FileSink {
        let mut sink = FileSink::new();
        sink.set_property("path", path).expect("path is writable");
        sink
    }

    #[test]
    fn activation_requires_path() {
        let mut sink = FileSink::new();
        assert!(matches!(
            sink.activate(),
            Err(SinkError::MissingOption { option: "path", .. })
        ));
    }

    #[test]
    fn append_before_activation_fails() {
        let sink = configured("unused.log");
        let event = LogEvent::new(Level::Info, "app", "hello");
        assert!(matches!(sink.append(&event), Err(SinkError::NotActivated(_))));
    }

    #[test]
    fn writes_layout_output_and_creates_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested/out.log");
        let mut sink = configured(path.to_str().expect("utf-8 path"));
        sink.set_layout(Arc::new(PatternLayout::new("%5p: %m%n")));
        sink.activate().expect("activation should succeed");

        sink.append(&LogEvent::new(Level::Info, "app", "foo"))
            .expect("append should succeed");
        sink.close();

        assert_eq!(fs::read_to_string(path).expect("log file"), " INFO: foo\n");
    }

    #[test]
    fn threshold_filters_verbose_events() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("warn.log");
        let mut sink = configured(path.to_str().expect("utf-8 path"));
        sink.set_property("threshold", "warn").expect("valid level");
        sink.activate().expect("activation should succeed");

        sink.append(&LogEvent::new(Level::Debug, "app", "skipped"))
            .expect("filtered append is ok");
        sink.append(&LogEvent::new(Level::Error, "app", "kept"))
            .expect("append should succeed");
        sink.close();

        assert_eq!(fs::read_to_string(path).expect("log file"), "kept\n");
    }

    #[test]
    fn append_false_truncates_existing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("truncate.log");
        fs::write(&path, "old\n").expect("seed file");

        let mut sink = configured(path.to_str().expect("utf-8 path"));
        sink.set_property("append", "false").expect("valid bool");
        sink.activate().expect("activation should succeed");
        sink.append(&LogEvent::new(Level::Info, "app", "new"))
            .expect("append should succeed");
        sink.close();

        assert_eq!(fs::read_to_string(path).expect("log file"), "new\n");
    }

    #[test]
    fn append_after_close_fails_and_close_is_idempotent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut sink = configured(dir.path().join("c.log").to_str().expect("utf-8 path"));
        sink.activate().expect("activation should succeed");
        sink.close();
        sink.close();
        let event = LogEvent::new(Level::Info, "app", "late");
        assert!(matches!(sink.append(&event), Err(SinkError::Closed(_))));
    }

    #[test]
    fn lists_only_set_properties() {
        let mut sink = FileSink::new();
        assert!(sink.list_properties().iter().all(|(name, _)| *name != "path"));

        sink.set_property("path", "a.log").expect("path is writable");
        sink.set_property("buffer_size", "512").expect("valid size");
        let listed = sink.list_properties();
        assert!(listed.contains(&("path", PropertyValue::Text("a.log".into()))));
        assert!(listed.contains(&("buffer_size", PropertyValue::Integer(512))));
        assert!(sink.set_property("buffer_size", "0").is_err());
    }

    #[cfg(target_os = "linux")]
    #[traced_test]
    #[test]
    fn close_reports_flush_failure() {
        let mut sink = configured("/dev/full");
        sink.set_property("immediate_flush", "false").expect("valid bool");
        sink.activate().expect("/dev/full opens for writing");

        sink.append(&LogEvent::new(Level::Info, "app", "buffered"))
            .expect("buffered append does not touch the device");
        sink.close();

        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("unable to flush buffered output on close"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one flush failure warning, got {n}")),
            }
        });
    }
}
