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

//! Conversion-pattern layout.

use super::Layout;
use crate::event::LogEvent;
use crate::observability::events;
use chrono::SecondsFormat;
use tracing::warn;

/// Widths above this are clamped so a pattern cannot request an unbounded pad.
pub(crate) const MAX_MIN_WIDTH: usize = 512;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Conversion {
    Message,
    Level,
    Target,
    Thread,
    Context,
    Timestamp,
    Error,
    Newline,
}

impl Conversion {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            'm' => Some(Self::Message),
            'p' => Some(Self::Level),
            'c' => Some(Self::Target),
            't' => Some(Self::Thread),
            'x' => Some(Self::Context),
            'd' => Some(Self::Timestamp),
            'e' => Some(Self::Error),
            'n' => Some(Self::Newline),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Literal(String),
    Converted {
        conversion: Conversion,
        min_width: usize,
        left_align: bool,
    },
}

/// Formats events with a conversion pattern such as `"%-5p [%x] %c: %m%n"`.
///
/// | Conversion | Output                                               |
/// |------------|------------------------------------------------------|
/// | `%m`       | message                                              |
/// | `%p`       | level                                                |
/// | `%c`       | target                                               |
/// | `%t`       | thread name                                          |
/// | `%x`       | rendered diagnostic context, empty when none         |
/// | `%d`       | timestamp, RFC 3339 with milliseconds                |
/// | `%e`       | error detail followed by a newline, empty when none  |
/// | `%n`       | newline                                              |
/// | `%%`       | a literal `%`                                        |
///
/// A conversion may carry a minimum width (`%5p` pads on the left) and a `-` flag
/// (`%-5p` pads on the right). Unrecognised conversions are copied literally.
///
/// ```
/// use keyed_appender::{DiagnosticContext, Layout, LogEvent, PatternLayout};
/// use log::Level;
///
/// let layout = PatternLayout::new("logs/%x.log");
/// let event = LogEvent::new(Level::Info, "app", "hello")
///     .with_context(["alt"].into_iter().collect::<DiagnosticContext>());
/// assert_eq!(layout.format(&event), "logs/alt.log");
/// ```
#[derive(Clone, Debug)]
pub struct PatternLayout {
    pattern: String,
    segments: Vec<Segment>,
}

impl PatternLayout {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let segments = parse(&pattern);
        Self { pattern, segments }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Layout for PatternLayout {
    fn format(&self, event: &LogEvent) -> String {
        let mut output = String::with_capacity(self.pattern.len() + event.message().len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Converted {
                    conversion,
                    min_width,
                    left_align,
                } => {
                    let value = convert(*conversion, event);
                    pad_into(&mut output, &value, *min_width, *left_align);
                }
            }
        }
        output
    }
}

fn convert(conversion: Conversion, event: &LogEvent) -> String {
    match conversion {
        Conversion::Message => event.message().to_string(),
        Conversion::Level => event.level().as_str().to_string(),
        Conversion::Target => event.target().to_string(),
        Conversion::Thread => event.thread().to_string(),
        Conversion::Context => event.context().to_string(),
        Conversion::Timestamp => event
            .timestamp()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        Conversion::Error => event
            .error()
            .map(|error| format!("{error}\n"))
            .unwrap_or_default(),
        Conversion::Newline => "\n".to_string(),
    }
}

fn pad_into(output: &mut String, value: &str, min_width: usize, left_align: bool) {
    let padding = min_width.saturating_sub(value.chars().count());
    if left_align {
        output.push_str(value);
        output.extend(std::iter::repeat(' ').take(padding));
    } else {
        output.extend(std::iter::repeat(' ').take(padding));
        output.push_str(value);
    }
}

fn parse(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            literal.push(ch);
            continue;
        }

        if chars.peek() == Some(&'%') {
            chars.next();
            literal.push('%');
            continue;
        }

        let mut spec = String::from('%');
        let left_align = chars.next_if_eq(&'-').is_some();
        if left_align {
            spec.push('-');
        }
        let mut min_width = 0usize;
        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
            spec.push(digit);
            min_width = min_width
                .saturating_mul(10)
                .saturating_add(digit.to_digit(10).unwrap_or_default() as usize);
        }
        if min_width > MAX_MIN_WIDTH {
            warn!(
                event = events::LAYOUT_WIDTH_CLAMPED,
                component = "pattern_layout",
                requested = min_width,
                max = MAX_MIN_WIDTH,
                "pattern width too large, clamping"
            );
            min_width = MAX_MIN_WIDTH;
        }

        match chars.next() {
            Some(code) => match Conversion::from_char(code) {
                Some(conversion) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Converted {
                        conversion,
                        min_width,
                        left_align,
                    });
                }
                None => {
                    literal.push_str(&spec);
                    literal.push(code);
                }
            },
            None => literal.push_str(&spec),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}
