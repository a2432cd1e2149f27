// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use regex::Regex;

const ASSIGNMENT_PATTERN: &str = r"^[ \t]*([A-Za-z0-9_]+)[ \t]*=[ \t]*(.*?)[ \t]*$";

/// Classification of one line of an environment file.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum ParsedLine<'a> {
    /// Blank or comment.
    Skip,
    /// `KEY=VALUE`, value still quoted.
    Assignment { key: &'a str, value: &'a str },
    Rejected,
}

pub(super) struct LineParser {
    pattern: Regex,
}

impl LineParser {
    pub(super) fn new() -> Result<Self> {
        let pattern = Regex::new(ASSIGNMENT_PATTERN)
            .with_context(|| "failed to compile env assignment regex")?;
        Ok(Self { pattern })
    }

    pub(super) fn parse_line<'a>(&self, raw: &'a str) -> ParsedLine<'a> {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return ParsedLine::Skip;
        }

        let Some(captures) = self.pattern.captures(raw) else {
            return ParsedLine::Rejected;
        };

        match (captures.get(1), captures.get(2)) {
            (Some(key), Some(value)) => ParsedLine::Assignment {
                key: key.as_str(),
                value: value.as_str(),
            },
            _ => ParsedLine::Rejected,
        }
    }
}
