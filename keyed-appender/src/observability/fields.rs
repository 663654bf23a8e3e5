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

//! Placeholder values and value-format helpers for structured fields.

pub const NONE: &str = "none";
pub const DEFAULT_THREAD_NAME: &str = "unknown-thread";

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_THREAD_NAME).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

pub fn format_optional_key(key: Option<&str>) -> &str {
    key.unwrap_or(NONE)
}
