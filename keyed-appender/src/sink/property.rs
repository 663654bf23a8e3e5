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

//! String-settable sink properties and their coercions.

use crate::error::PropertyError;
use log::LevelFilter;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const LEVEL_CHOICES: &[&str] = &["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"];

/// Declares one named configuration property of a sink type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub readable: bool,
    pub writable: bool,
}

impl PropertyDescriptor {
    pub const fn read_write(name: &'static str) -> Self {
        Self {
            name,
            readable: true,
            writable: true,
        }
    }

    pub const fn read_only(name: &'static str) -> Self {
        Self {
            name,
            readable: true,
            writable: false,
        }
    }

    /// Whether the property both reports a value and accepts one, i.e. can be copied.
    pub fn is_transferable(&self) -> bool {
        self.readable && self.writable
    }
}

/// Current value of a property as reported by a sink.
///
/// `Display` renders the same string form that [`ConfigurableSink::set_property`]
/// accepts back.
///
/// [`ConfigurableSink::set_property`]: crate::ConfigurableSink::set_property
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Choice(&'static str),
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Text(value) => write!(f, "{value}"),
            PropertyValue::Bool(value) => write!(f, "{value}"),
            PropertyValue::Integer(value) => write!(f, "{value}"),
            PropertyValue::Choice(value) => write!(f, "{value}"),
        }
    }
}

/// Finds the writable descriptor called `name`.
pub fn find_writable<'a>(
    descriptors: &'a [PropertyDescriptor],
    sink_type: &'static str,
    name: &str,
) -> Result<&'a PropertyDescriptor, PropertyError> {
    let descriptor = descriptors
        .iter()
        .find(|descriptor| descriptor.name == name)
        .ok_or_else(|| PropertyError::Unknown {
            sink_type,
            name: name.to_string(),
        })?;
    if !descriptor.writable {
        return Err(PropertyError::ReadOnly {
            sink_type,
            name: name.to_string(),
        });
    }
    Ok(descriptor)
}

pub fn parse_bool(name: &str, raw: &str) -> Result<bool, PropertyError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(name, "a boolean", raw)),
    }
}

pub fn parse_integer(name: &str, raw: &str) -> Result<i64, PropertyError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| invalid(name, "an integer", raw))
}

/// Matches `raw` case-insensitively against `choices`, returning the canonical spelling.
pub fn parse_choice(
    name: &str,
    raw: &str,
    choices: &'static [&'static str],
) -> Result<&'static str, PropertyError> {
    let trimmed = raw.trim();
    choices
        .iter()
        .copied()
        .find(|choice| choice.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| invalid(name, &format!("one of {}", choices.join("|")), raw))
}

pub fn parse_level(name: &str, raw: &str) -> Result<LevelFilter, PropertyError> {
    let choice = parse_choice(name, raw, LEVEL_CHOICES)?;
    LevelFilter::from_str(choice).map_err(|_| invalid(name, "a level", raw))
}

fn invalid(name: &str, expected: &str, raw: &str) -> PropertyError {
    PropertyError::InvalidValue {
        name: name.to_string(),
        expected: expected.to_string(),
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        find_writable, parse_bool, parse_choice, parse_integer, parse_level, PropertyDescriptor,
        PropertyValue,
    };
    use crate::error::PropertyError;
    use log::LevelFilter;

    const PROPERTIES: &[PropertyDescriptor] = &[
        PropertyDescriptor::read_write("path"),
        PropertyDescriptor::read_only("bytes_written"),
    ];

    #[test]
    fn find_writable_rejects_unknown_and_read_only() {
        assert!(find_writable(PROPERTIES, "TestSink", "path").is_ok());
        assert_eq!(
            find_writable(PROPERTIES, "TestSink", "file"),
            Err(PropertyError::Unknown {
                sink_type: "TestSink",
                name: "file".to_string()
            })
        );
        assert!(matches!(
            find_writable(PROPERTIES, "TestSink", "bytes_written"),
            Err(PropertyError::ReadOnly { .. })
        ));
    }

    #[test]
    fn scalar_coercions() {
        assert_eq!(parse_bool("append", " TRUE "), Ok(true));
        assert_eq!(parse_bool("append", "false"), Ok(false));
        assert!(parse_bool("append", "yes").is_err());
        assert_eq!(parse_integer("buffer_size", "4096"), Ok(4096));
        assert!(parse_integer("buffer_size", "4k").is_err());
    }

    #[test]
    fn choice_and_level_coercions_are_case_insensitive() {
        assert_eq!(parse_choice("target", "StdErr", &["stdout", "stderr"]), Ok("stderr"));
        assert_eq!(parse_level("threshold", "warn"), Ok(LevelFilter::Warn));
        assert!(parse_level("threshold", "loud").is_err());
    }

    #[test]
    fn values_render_in_settable_form() {
        assert_eq!(PropertyValue::Bool(true).to_string(), "true");
        assert_eq!(PropertyValue::Integer(-3).to_string(), "-3");
        assert_eq!(PropertyValue::Choice("INFO").to_string(), "INFO");
        assert_eq!(PropertyValue::Text("a b".into()).to_string(), "a b");
    }
}
