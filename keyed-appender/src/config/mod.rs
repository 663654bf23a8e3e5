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

//! JSON5 configuration model.
//!
//! ```json5
//! {
//!   sinks: {
//!     FILE: {
//!       kind: "file",
//!       properties: { path: "target/logs/default.log", append: false },
//!       layout: { pattern: "%-5p %m%n" },
//!     },
//!   },
//!   routers: [
//!     {
//!       name: "DISPATCH",
//!       property_name: "path",
//!       layout: { pattern: "target/logs/%x.log" },
//!       sink_ref: "FILE",
//!     },
//!   ],
//!   root: "DISPATCH",
//! }
//! ```
//!
//! Property values may be strings, booleans or numbers; they reach the sink in their
//! string form after `${NAME}` substitution. Router `property_name`, `layout` and
//! `sink_ref` are all optional here so that a missing one is reported by router
//! activation rather than by the parser.

mod setup;

pub use setup::LoggingSetup;

use crate::error::ConfigError;
use crate::routing::destination_cache::CachePolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

const DEFAULT_LEVEL: &str = "info";

fn default_level() -> String {
    DEFAULT_LEVEL.to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub sinks: BTreeMap<String, SinkConfig>,
    #[serde(default)]
    pub routers: Vec<RouterConfig>,
    /// Router or sink that receives every event.
    pub root: String,
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SinkConfig {
    pub kind: String,
    #[serde(default)]
    pub properties: BTreeMap<String, ConfigValue>,
    #[serde(default)]
    pub layout: Option<LayoutConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConfigValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
}

impl Display for ConfigValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::Text(value) => write!(f, "{value}"),
            ConfigValue::Bool(value) => write!(f, "{value}"),
            ConfigValue::Integer(value) => write!(f, "{value}"),
            ConfigValue::Float(value) => write!(f, "{value}"),
        }
    }
}

/// `{ pattern }` builds a pattern layout; adding `debug_pattern` builds the level-aware
/// layout.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    pub pattern: String,
    #[serde(default)]
    pub debug_pattern: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    pub name: String,
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub layout: Option<LayoutConfig>,
    #[serde(default)]
    pub sink_ref: Option<String>,
    #[serde(default)]
    pub cache_policy: CachePolicy,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        contents.parse()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        json5::from_str(contents).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}
