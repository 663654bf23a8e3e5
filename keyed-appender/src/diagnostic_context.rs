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

//! Stack-shaped diagnostic context carried by each event.

use std::fmt::{Display, Formatter};

/// An owned stack of context frames, innermost last.
///
/// Events carry a snapshot of this stack taken at emission time. The router derives
/// its routing key from [`DiagnosticContext::render`] and never mutates it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticContext {
    frames: Vec<String>,
}

impl DiagnosticContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: impl Into<String>) {
        self.frames.push(frame.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.frames.pop()
    }

    pub fn peek(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Drops every frame above `depth`.
    pub fn truncate(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(String::as_str)
    }

    /// Joins all frames with a single space, outermost first.
    ///
    /// Returns `None` when the stack is empty or renders to an empty string, which
    /// means "no routing key".
    pub fn render(&self) -> Option<String> {
        let rendered = self.frames.join(" ");
        if rendered.is_empty() {
            None
        } else {
            Some(rendered)
        }
    }
}

impl Display for DiagnosticContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.frames.join(" "))
    }
}

impl<S: Into<String>> FromIterator<S> for DiagnosticContext {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            frames: iter.into_iter().map(Into::into).collect(),
        }
    }
}
