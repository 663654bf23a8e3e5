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

use integration_test_utils::{fixed_substitutor, init_logging, keyed_event, CountingSink};
use keyed_appender::{
    CachePolicy, Config, ConfigError, ConfigurableSink, LogEvent, LoggingSetup, PropertyValue, Sink,
    SinkRegistry,
};
use log::Level;
use std::fs;

const DISPATCH_CONFIG: &str = r#"{
    sinks: {
        FILE: {
            kind: "file",
            properties: { path: "${LOG_DIR}/default.log", append: false },
            layout: { pattern: "%-5p %m%n%e", debug_pattern: "%p %m%n%e" },
        },
    },
    routers: [
        {
            name: "DISPATCH",
            property_name: "path",
            layout: { pattern: "${LOG_DIR}/sessions/%x.log" },
            sink_ref: "FILE",
            cache_policy: "first_writer_wins",
        },
    ],
    root: "DISPATCH",
    level: "debug",
}"#;

#[test]
fn config_file_wires_a_dispatching_router() {
    init_logging();
    let dir = tempfile::tempdir().expect("temp dir");
    let config_path = dir.path().join("dispatch.json5");
    fs::write(&config_path, DISPATCH_CONFIG).expect("config written");
    let root = dir.path().display().to_string();

    let config = Config::from_file(&config_path).expect("config parses");
    let setup = LoggingSetup::build(
        &config,
        &SinkRegistry::default(),
        fixed_substitutor(&[("LOG_DIR", root.as_str())]),
    )
    .expect("setup builds");
    assert_eq!(setup.level(), log::LevelFilter::Debug);

    let router = setup.router("DISPATCH").expect("router built");
    assert_eq!(router.cache_policy(), CachePolicy::FirstWriterWins);

    let sink = setup.root();
    sink.append(&keyed_event("s1", "hello")).expect("delivered");
    sink.append(
        &LogEvent::new(Level::Debug, "setup", "inspect")
            .with_context(keyed_event("s1", "").context().clone())
            .with_error("boom"),
    )
    .expect("delivered");
    sink.append(&LogEvent::new(Level::Warn, "setup", "unkeyed"))
        .expect("delivered");

    let destination = router.destination("s1").expect("bound");
    assert_eq!(
        destination.property("path"),
        Some(PropertyValue::Text(format!("{root}/sessions/s1.log")))
    );
    assert_eq!(destination.property("append"), Some(PropertyValue::Bool(false)));

    setup.shutdown();

    assert_eq!(
        support::read(&dir.path().join("sessions/s1.log")),
        "INFO  hello\nDEBUG inspect [boom]"
    );
    assert_eq!(
        support::read(&dir.path().join("default.log")),
        "WARN  unkeyed\n"
    );
}

#[test]
fn custom_sink_kinds_can_be_registered() {
    init_logging();
    let mut registry = SinkRegistry::default();
    registry.register("counting", || Box::new(CountingSink::new("counting")));

    let config: Config = r#"{
        sinks: { COUNT: { kind: "counting", properties: { key: "none" } } },
        routers: [{ name: "R", property_name: "key", layout: { pattern: "k-%x" }, sink_ref: "COUNT" }],
        root: "R",
    }"#
    .parse()
    .expect("config parses");
    let setup = LoggingSetup::build(&config, &registry, fixed_substitutor(&[]))
        .expect("setup builds");

    setup
        .root()
        .append(&keyed_event("one", "first"))
        .expect("delivered");
    let destination = setup
        .router("R")
        .and_then(|router| router.destination("one"))
        .expect("bound");
    assert_eq!(
        destination.property("key"),
        Some(PropertyValue::Text("k-one".into()))
    );
    assert_eq!(
        setup.sink("COUNT").and_then(|sink| sink.property("key")),
        Some(PropertyValue::Text("none".into()))
    );
    setup.shutdown();
}

#[test]
fn incomplete_router_configuration_fails_setup() {
    init_logging();
    let config: Config = r#"{
        sinks: { OUT: { kind: "console" } },
        routers: [{ name: "R", layout: { pattern: "%x" }, sink_ref: "OUT" }],
        root: "R",
    }"#
    .parse()
    .expect("config parses");

    let err = LoggingSetup::build(&config, &SinkRegistry::default(), fixed_substitutor(&[]))
        .err()
        .expect("missing property name");
    assert!(matches!(err, ConfigError::MissingPropertyName { router } if router == "R"));
}
