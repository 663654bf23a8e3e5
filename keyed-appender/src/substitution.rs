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

//! `${NAME}` variable expansion for configuration values and routing keys.

use crate::observability::events;
use std::collections::HashMap;
use tracing::warn;

const COMPONENT: &str = "substitution";
const VARIABLE_START: &str = "${";
const VARIABLE_END: char = '}';
// Expanded values are themselves expanded, up to this depth.
const MAX_SUBSTITUTION_DEPTH: usize = 8;

/// Resolves variable names to values during `${NAME}` expansion.
pub trait Substitutor: Send + Sync {
    fn lookup(&self, name: &str) -> Option<String>;

    /// Replaces every `${NAME}` token in `input`.
    ///
    /// Undefined names expand to the empty string. An unterminated `${` leaves the rest
    /// of the input untouched.
    fn substitute(&self, input: &str) -> String {
        substitute_with(input, &|name| self.lookup(name), 0)
    }
}

/// Reads variables from the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvSubstitutor;

impl Substitutor for EnvSubstitutor {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Reads variables from a fixed map.
#[derive(Clone, Debug, Default)]
pub struct MapSubstitutor {
    variables: HashMap<String, String>,
}

impl MapSubstitutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSubstitutor {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Substitutor for MapSubstitutor {
    fn lookup(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }
}

fn substitute_with(input: &str, lookup: &dyn Fn(&str) -> Option<String>, depth: usize) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(VARIABLE_START) {
        output.push_str(&rest[..start]);
        let after_start = &rest[start + VARIABLE_START.len()..];
        let Some(end) = after_start.find(VARIABLE_END) else {
            warn!(
                event = events::SUBSTITUTION_UNTERMINATED,
                component = COMPONENT,
                input,
                "unterminated variable reference, leaving remainder verbatim"
            );
            output.push_str(&rest[start..]);
            return output;
        };

        let name = &after_start[..end];
        let value = lookup(name).unwrap_or_default();
        if depth < MAX_SUBSTITUTION_DEPTH && value.contains(VARIABLE_START) {
            output.push_str(&substitute_with(&value, lookup, depth + 1));
        } else {
            output.push_str(&value);
        }
        rest = &after_start[end + 1..];
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::{MapSubstitutor, Substitutor};

    #[test]
    fn plain_text_is_unchanged() {
        let substitutor = MapSubstitutor::new();
        assert_eq!(substitutor.substitute("logs/alt.log"), "logs/alt.log");
    }

    #[test]
    fn known_and_unknown_variables_expand() {
        let substitutor = MapSubstitutor::new().with("KEY", "key");
        assert_eq!(substitutor.substitute("${KEY}:two"), "key:two");
        assert_eq!(substitutor.substitute("a${MISSING}b"), "ab");
    }

    #[test]
    fn unterminated_reference_is_left_verbatim() {
        let substitutor = MapSubstitutor::new().with("KEY", "key");
        assert_eq!(substitutor.substitute("${KEY}/${oops"), "key/${oops");
    }

    #[test]
    fn expanded_values_are_expanded_again() {
        let substitutor: MapSubstitutor = [("ROOT", "target"), ("LOGS", "${ROOT}/logs")]
            .into_iter()
            .collect();
        assert_eq!(substitutor.substitute("${LOGS}/x.log"), "target/logs/x.log");
    }

    #[test]
    fn self_referencing_value_terminates() {
        let substitutor = MapSubstitutor::new().with("LOOP", "${LOOP}");
        assert_eq!(substitutor.substitute("${LOOP}"), "${LOOP}");
    }
}
