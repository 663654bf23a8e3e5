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

/// Splits a `context<TAB>message` line. A line without a tab, or with nothing before
/// it, has no context.
pub(crate) fn split_line(line: &str) -> (Option<&str>, &str) {
    match line.split_once('\t') {
        Some((context, message)) if !context.trim().is_empty() => (Some(context.trim()), message),
        Some((_, message)) => (None, message),
        None => (None, line),
    }
}
