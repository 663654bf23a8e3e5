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

//! Structured log event routed by the appenders in this crate.

use crate::diagnostic_context::DiagnosticContext;
use crate::ndc;
use crate::observability::fields;
use chrono::{DateTime, Utc};
use log::Level;

#[derive(Clone, Debug)]
pub struct LogEvent {
    level: Level,
    target: String,
    message: String,
    thread: String,
    timestamp: DateTime<Utc>,
    error: Option<String>,
    context: DiagnosticContext,
}

impl LogEvent {
    /// Builds an event stamped with the current thread name and time and an empty context.
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            target: target.into(),
            message: message.into(),
            thread: fields::current_thread_name_or_default(),
            timestamp: Utc::now(),
            error: None,
            context: DiagnosticContext::new(),
        }
    }

    /// Like [`LogEvent::new`], but attaches a snapshot of this thread's [`ndc`] stack.
    pub fn capture(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(level, target, message).with_context(ndc::snapshot())
    }

    pub fn with_context(mut self, context: DiagnosticContext) -> Self {
        self.context = context;
        self
    }

    /// Attaches error detail, e.g. a rendered error chain, to the event.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_thread(mut self, thread: impl Into<String>) -> Self {
        self.thread = thread.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn thread(&self) -> &str {
        &self.thread
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn context(&self) -> &DiagnosticContext {
        &self.context
    }

    /// The rendered diagnostic context, or `None` when the event carries no context.
    pub fn context_key(&self) -> Option<String> {
        self.context.render()
    }
}
