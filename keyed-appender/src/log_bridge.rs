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

//! Bridge from the `log` facade to a [`Sink`].

use crate::event::LogEvent;
use crate::observability::events;
use crate::sink::Sink;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::Arc;
use tracing::warn;

const COMPONENT: &str = "log_bridge";

/// A [`log::Log`] that turns each record into a [`LogEvent`] carrying the calling
/// thread's diagnostic context and hands it to a sink, typically a
/// [`KeyedRouter`](crate::KeyedRouter).
///
/// `log` callers cannot observe delivery failures, so they are reported as `tracing`
/// warnings instead.
pub struct KeyedLogger {
    sink: Arc<dyn Sink>,
    level: LevelFilter,
}

impl KeyedLogger {
    pub fn new(sink: Arc<dyn Sink>, level: LevelFilter) -> Self {
        Self { sink, level }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Installs this logger as the process-wide `log` logger.
    ///
    /// Fails if a logger is already installed.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn event_for(record: &Record<'_>) -> LogEvent {
        LogEvent::capture(record.level(), record.target(), record.args().to_string())
    }
}

impl Log for KeyedLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Err(err) = self.sink.append(&Self::event_for(record)) {
            warn!(
                event = events::BRIDGE_APPEND_FAILED,
                component = COMPONENT,
                sink = self.sink.name(),
                err = %err,
                "unable to deliver log record"
            );
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::KeyedLogger;
    use crate::ndc;
    use crate::test_support::RecordingSink;
    use crate::{ConfigurableSink, KeyedRouter, PatternLayout, PropertyValue};
    use log::{Level, LevelFilter, Log, Record};
    use std::sync::Arc;

    #[test]
    fn records_below_level_are_skipped() {
        let sink = Arc::new(RecordingSink::named("out"));
        let logger = KeyedLogger::new(sink.clone(), LevelFilter::Info);

        for level in [Level::Error, Level::Info, Level::Debug] {
            logger.log(
                &Record::builder()
                    .level(level)
                    .target("bridge")
                    .args(format_args!("{level}"))
                    .build(),
            );
        }

        assert_eq!(sink.messages(), vec!["ERROR", "INFO"]);
    }

    #[test]
    fn thread_context_selects_the_destination() {
        let mut template = RecordingSink::named("template");
        template.set_property("key", "none").expect("key is writable");
        let mut router = KeyedRouter::new("DISPATCH");
        router.set_property_name("key").expect("configurable");
        router
            .set_layout(Arc::new(PatternLayout::new("%x")))
            .expect("configurable");
        router.add_sink(Arc::new(template)).expect("first template");
        router.activate().expect("complete configuration");
        let router = Arc::new(router);

        let logger = KeyedLogger::new(router.clone(), LevelFilter::Trace);
        {
            let _request = ndc::push("request-7");
            logger.log(
                &Record::builder()
                    .level(Level::Info)
                    .args(format_args!("inside"))
                    .build(),
            );
        }

        let destination = router.destination("request-7").expect("bound by context");
        assert_eq!(
            destination.property("key"),
            Some(PropertyValue::Text("request-7".into()))
        );
        assert_eq!(ndc::depth(), 0);
    }

    #[test]
    fn delivery_failures_do_not_panic() {
        let router = Arc::new(KeyedRouter::new("UNCONFIGURED"));
        let logger = KeyedLogger::new(router, LevelFilter::Trace);
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("nowhere to go"))
                .build(),
        );
    }
}
