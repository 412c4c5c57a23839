// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Color utilities.

use std::borrow::Cow;

use crate::Severity;

/// A console style: an optional foreground color, optionally bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    #[cfg(feature = "colored")]
    pub color: Option<colored::Color>,
    pub bold: bool,
}

impl Style {
    /// The style that leaves text untouched.
    pub const PLAIN: Style = Style {
        #[cfg(feature = "colored")]
        color: None,
        bold: false,
    };

    #[cfg(feature = "colored")]
    pub const fn new(color: colored::Color) -> Style {
        Style {
            color: Some(color),
            bold: false,
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Style {
        self.bold = true;
        self
    }
}

/// Colors for different log levels.
#[derive(Debug, Clone)]
pub struct LevelColor {
    pub fatal: Style,
    pub error: Style,
    pub warning: Style,
    pub note: Style,
    pub info: Style,
    pub trace: Style,
    pub debug: Style,
    pub detail: Style,
}

#[cfg(feature = "colored")]
impl Default for LevelColor {
    fn default() -> Self {
        use colored::Color;

        Self {
            fatal: Style::new(Color::Red).bold(),
            error: Style::new(Color::Red),
            warning: Style::new(Color::Yellow),
            note: Style::new(Color::BrightBlack).bold(),
            info: Style::PLAIN,
            trace: Style::new(Color::Blue),
            debug: Style::new(Color::Cyan),
            detail: Style::PLAIN,
        }
    }
}

#[cfg(not(feature = "colored"))]
impl Default for LevelColor {
    fn default() -> Self {
        Self {
            fatal: Style::PLAIN,
            error: Style::PLAIN,
            warning: Style::PLAIN,
            note: Style::PLAIN,
            info: Style::PLAIN,
            trace: Style::PLAIN,
            debug: Style::PLAIN,
            detail: Style::PLAIN,
        }
    }
}

impl LevelColor {
    pub fn style(&self, level: Severity) -> Style {
        match level {
            Severity::Fatal => self.fatal,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Note => self.note,
            Severity::Info => self.info,
            Severity::Trace => self.trace,
            Severity::Debug => self.debug,
            Severity::Detail => self.detail,
        }
    }

    /// Colorize a whole formatted line according to its level.
    pub fn colorize<'a>(&self, no_color: bool, level: Severity, line: &'a str) -> Cow<'a, str> {
        let style = self.style(level);
        if no_color || style == Style::PLAIN {
            return Cow::Borrowed(line);
        }

        Cow::Owned(paint(style, line))
    }
}

#[cfg(feature = "colored")]
fn paint(style: Style, line: &str) -> String {
    use colored::Colorize;

    let mut colored = colored::ColoredString::from(line);
    if let Some(color) = style.color {
        colored = colored.color(color);
    }
    if style.bold {
        colored = colored.bold();
    }
    colored.to_string()
}

#[cfg(not(feature = "colored"))]
fn paint(_: Style, line: &str) -> String {
    line.to_string()
}
