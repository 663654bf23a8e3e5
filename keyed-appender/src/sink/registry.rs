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

//! Maps configuration `kind` names to sink constructors.

use super::{ConfigurableSink, ConsoleSink, FileSink};
use crate::error::ConfigError;
use std::collections::HashMap;

pub type SinkConstructor = Box<dyn Fn() -> Box<dyn ConfigurableSink> + Send + Sync>;

/// Registry of sink kinds available to the configuration loader.
///
/// [`SinkRegistry::default`] knows `file` and `console`.
pub struct SinkRegistry {
    constructors: HashMap<String, SinkConstructor>,
}

impl SinkRegistry {
    /// A registry without any kinds.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers (or replaces) a kind.
    pub fn register<F>(&mut self, kind: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn ConfigurableSink> + Send + Sync + 'static,
    {
        self.constructors.insert(kind.into(), Box::new(constructor));
    }

    pub fn create(&self, kind: &str) -> Result<Box<dyn ConfigurableSink>, ConfigError> {
        self.constructors
            .get(kind)
            .map(|constructor| constructor())
            .ok_or_else(|| ConfigError::UnknownSinkKind(kind.to_string()))
    }

    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("file", || Box::new(FileSink::new()));
        registry.register("console", || Box::new(ConsoleSink::new()));
        registry
    }
}
