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

use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// Levels are totally ordered from the least verbose ([`Severity::Fatal`]) to the most verbose
/// ([`Severity::Detail`]). A logger with threshold `T` emits a record of level `L` iff `T >= L`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Fatal = 0,
    Error = 1,
    Warning = 2,
    Note = 3,
    Info = 4,
    Trace = 5,
    Debug = 6,
    Detail = 7,
}

/// Raw value standing for "no override" where a severity is stored in an atomic.
pub(crate) const UNCHANGED: u8 = u8::MAX;

impl Severity {
    pub const MIN: Severity = Severity::Fatal;
    pub const MAX: Severity = Severity::Detail;

    /// All severities from the least to the most verbose.
    pub const ALL: [Severity; 8] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Note,
        Severity::Info,
        Severity::Trace,
        Severity::Debug,
        Severity::Detail,
    ];

    /// The next more verbose level, wrapping from [`Severity::MAX`] to [`Severity::MIN`].
    pub fn next_cyclic(self) -> Severity {
        Severity::ALL[(self as usize + 1) % Severity::ALL.len()]
    }

    /// The upper-case tag written into log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Note => "NOTE",
            Severity::Info => "INFO",
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Detail => "DETAIL",
        }
    }

    /// Whether console output of this level goes to stderr.
    pub fn is_stderr(self) -> bool {
        self <= Severity::Warning
    }

    pub(crate) fn from_u8(raw: u8) -> Option<Severity> {
        Severity::ALL.get(raw as usize).copied()
    }

    pub(crate) fn to_raw(level: Option<Severity>) -> u8 {
        level.map_or(UNCHANGED, |level| level as u8)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Trace,
        }
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_ascii_lowercase().as_str() {
            "fatal" | "fata" => Severity::Fatal,
            "error" | "erro" => Severity::Error,
            "warning" | "warn" => Severity::Warning,
            "note" => Severity::Note,
            "info" => Severity::Info,
            "trace" | "trac" => Severity::Trace,
            "debug" | "debu" => Severity::Debug,
            "detail" | "deta" => Severity::Detail,
            _ => return Err(ParseSeverityError(s.to_string())),
        };
        Ok(level)
    }
}
