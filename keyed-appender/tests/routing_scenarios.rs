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

mod support;

use integration_test_utils::{fixed_substitutor, init_logging, keyed_event, unkeyed_event};
use keyed_appender::{CachePolicy, ConfigurableSink, FileSink, PropertyValue, RouterState, Sink};
use std::sync::Arc;

#[test]
fn keyed_events_land_in_their_own_files() {
    init_logging();
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path().display().to_string();

    let template = support::activated_file_sink(&dir.path().join("default.log"), "%m%n");
    let router = support::active_router(
        template.clone(),
        "path",
        "${LOG_DIR}/logs/%x.log",
        CachePolicy::SingleFlight,
        fixed_substitutor(&[("LOG_DIR", root.as_str())]),
    );

    router.append(&keyed_event("alt", "alt one")).expect("delivered");
    router.append(&keyed_event("other", "other one")).expect("delivered");
    router.append(&keyed_event("alt", "alt two")).expect("delivered");
    router.append(&unkeyed_event("no key")).expect("delivered");

    let alt = router.destination("alt").expect("alt bound");
    assert_eq!(
        alt.property("path"),
        Some(PropertyValue::Text(format!("{root}/logs/alt.log")))
    );
    assert_eq!(router.destination_keys(), vec!["alt", "other"]);
    assert_eq!(router.attached_sinks().len(), 1);
    assert!(Arc::ptr_eq(&router.attached_sinks()[0], &template));

    router.close();
    assert_eq!(router.state(), RouterState::Closed);
    for (_, destination) in router.destinations() {
        destination.close();
    }
    template.close();

    assert_eq!(
        support::read(&dir.path().join("logs/alt.log")),
        "alt one\nalt two\n"
    );
    assert_eq!(
        support::read(&dir.path().join("logs/other.log")),
        "other one\n"
    );
    assert_eq!(support::read(&dir.path().join("default.log")), "no key\n");
}

#[test]
fn copies_keep_every_other_template_property() {
    init_logging();
    let dir = tempfile::tempdir().expect("temp dir");

    let mut template = FileSink::new();
    template
        .set_property("path", &dir.path().join("default.log").display().to_string())
        .expect("path");
    template.set_property("append", "false").expect("append");
    template.set_property("threshold", "warn").expect("threshold");
    template.set_property("buffer_size", "256").expect("buffer size");
    template.activate().expect("template opens");
    let template: Arc<dyn ConfigurableSink> = Arc::new(template);
    let pattern = format!("{}/%x.log", dir.path().display());
    let router = support::active_router(
        template.clone(),
        "path",
        &pattern,
        CachePolicy::SingleFlight,
        fixed_substitutor(&[]),
    );

    router.append(&keyed_event("tenant", "ignored at info")).expect("delivered");
    let copy = router.destination("tenant").expect("bound");
    for property in ["name", "append", "threshold", "buffer_size", "immediate_flush"] {
        assert_eq!(copy.property(property), template.property(property), "{property}");
    }
    assert_ne!(copy.property("path"), template.property("path"));

    copy.close();
    assert_eq!(support::read(&dir.path().join("tenant.log")), "");
}
