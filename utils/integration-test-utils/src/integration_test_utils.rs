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

use keyed_appender::{DiagnosticContext, LogEvent, MapSubstitutor, Substitutor};
use log::Level;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly `tracing` subscriber once per process.
///
/// The subscriber is set directly rather than through `try_init`, which would also
/// claim the `log` facade and leave no room for `KeyedLogger::install`.
pub fn init_logging() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn fixed_substitutor(pairs: &[(&str, &str)]) -> Arc<dyn Substitutor> {
    Arc::new(pairs.iter().copied().collect::<MapSubstitutor>())
}

pub fn keyed_event(context: &str, message: &str) -> LogEvent {
    LogEvent::new(Level::Info, "integration", message)
        .with_context(DiagnosticContext::from_iter(context.split(' ')))
}

pub fn unkeyed_event(message: &str) -> LogEvent {
    LogEvent::new(Level::Info, "integration", message)
}
