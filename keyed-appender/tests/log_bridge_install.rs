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

//! Installs the process-wide `log` logger, so it lives alone in its own test binary.

mod support;

use integration_test_utils::{fixed_substitutor, init_logging, CountingSink};
use keyed_appender::{ndc, CachePolicy, KeyedLogger};
use log::LevelFilter;
use std::sync::Arc;

#[test]
fn log_macros_route_by_thread_context() {
    init_logging();
    let template = CountingSink::new("template");
    let stats = template.stats();
    let router = support::active_router(
        Arc::new(template),
        "key",
        "%x",
        CachePolicy::SingleFlight,
        fixed_substitutor(&[]),
    );

    KeyedLogger::new(router.clone(), LevelFilter::Info)
        .install()
        .expect("no logger installed yet");

    log::info!("before any context");
    {
        let _order = ndc::push("order-1");
        log::info!("placing order");
        {
            let _payment = ndc::push("payment");
            log::warn!("charging card");
        }
        log::debug!("below the level");
    }

    assert_eq!(router.destination_keys(), vec!["order-1", "order-1 payment"]);
    assert_eq!(
        stats.delivered(),
        vec![
            (String::new(), "before any context".to_string()),
            ("order-1".to_string(), "placing order".to_string()),
            ("order-1 payment".to_string(), "charging card".to_string()),
        ]
    );
}
