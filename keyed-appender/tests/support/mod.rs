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
    CachePolicy, ConfigurableSink, FileSink, KeyedRouter, PatternLayout, Substitutor,
};
use std::path::Path;
use std::sync::Arc;

#[allow(dead_code)]
pub(crate) fn activated_file_sink(path: &Path, pattern: &str) -> Arc<dyn ConfigurableSink> {
    let mut sink = FileSink::new();
    sink.set_property("path", &path.display().to_string())
        .expect("path is writable");
    sink.set_layout(Arc::new(PatternLayout::new(pattern)));
    sink.activate().expect("file sink opens");
    Arc::new(sink)
}

pub(crate) fn active_router(
    template: Arc<dyn ConfigurableSink>,
    property_name: &str,
    key_pattern: &str,
    policy: CachePolicy,
    substitutor: Arc<dyn Substitutor>,
) -> Arc<KeyedRouter> {
    let mut router = KeyedRouter::new("DISPATCH");
    router
        .set_property_name(property_name)
        .expect("router is configurable");
    router
        .set_layout(Arc::new(PatternLayout::new(key_pattern)))
        .expect("router is configurable");
    router
        .set_substitutor(substitutor)
        .expect("router is configurable");
    router
        .set_cache_policy(policy)
        .expect("router is configurable");
    router.add_sink(template).expect("first template");
    router.activate().expect("complete configuration");
    Arc::new(router)
}

#[allow(dead_code)]
pub(crate) fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|err| panic!("reading {}: {err}", path.display()))
}
