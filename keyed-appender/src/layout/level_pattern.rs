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

//! Layout that switches patterns by severity and folds short debug output onto one line.

use super::{Layout, PatternLayout};
use crate::event::LogEvent;
use log::Level;

const FOLD_PREFIX: &str = " [";
const FOLD_SUFFIX: &str = "]";

/// Formats DEBUG and TRACE events with a dedicated debug pattern, everything else with
/// the regular pattern.
///
/// When the debug output is exactly two newline-terminated lines (typically a message
/// line followed by a one-line error from `%e`), it is folded to
/// `"<first line> [<second line>]"` so terse debug output stays on a single line.
///
/// ```
/// use keyed_appender::{Layout, LevelPatternLayout, LogEvent};
/// use log::Level;
///
/// let layout = LevelPatternLayout::new("%p: %m%n").with_debug_pattern("%p: %m%n%e");
/// let event = LogEvent::new(Level::Debug, "app", "Hello").with_error("Planned");
/// assert_eq!(layout.format(&event), "DEBUG: Hello [Planned]");
/// ```
#[derive(Clone, Debug)]
pub struct LevelPatternLayout {
    pattern: PatternLayout,
    debug_pattern: PatternLayout,
}

impl LevelPatternLayout {
    /// Uses `pattern` for every level until a debug pattern is set.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = PatternLayout::new(pattern);
        Self {
            debug_pattern: pattern.clone(),
            pattern,
        }
    }

    pub fn with_debug_pattern(mut self, debug_pattern: impl Into<String>) -> Self {
        self.debug_pattern = PatternLayout::new(debug_pattern);
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.pattern()
    }

    pub fn debug_pattern(&self) -> &str {
        self.debug_pattern.pattern()
    }
}

impl Layout for LevelPatternLayout {
    fn format(&self, event: &LogEvent) -> String {
        if event.level() >= Level::Debug {
            fold_two_lines(self.debug_pattern.format(event), FOLD_PREFIX, FOLD_SUFFIX)
        } else {
            self.pattern.format(event)
        }
    }
}

/// Folds `"a\nb\n"` into `"a<prefix>b<suffix>"`; any other shape is returned unchanged.
pub(crate) fn fold_two_lines(input: String, prefix: &str, suffix: &str) -> String {
    let Some(first) = input.find('\n') else {
        return input;
    };
    if first == 0 || !input.ends_with('\n') {
        return input;
    }
    let last = input.len() - 1;
    if last == first || input[first + 1..last].contains('\n') {
        return input;
    }

    let mut folded = String::with_capacity(input.len() + prefix.len() + suffix.len());
    folded.push_str(&input[..first]);
    folded.push_str(prefix);
    folded.push_str(&input[first + 1..last]);
    folded.push_str(suffix);
    folded
}
