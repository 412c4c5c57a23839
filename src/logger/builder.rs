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

use std::path::PathBuf;

use super::DEFAULT_LOG_FILE;
use super::DEFAULT_LOG_SIZE;
use super::MIN_LOG_SIZE;
use super::Registry;
use crate::LevelColor;
use crate::Outputs;
use crate::Severity;

/// Environment variable naming the default log file of [`RegistryBuilder::from_env`].
pub const FILE_ENV: &str = "ROTALOG_FILE";

/// Environment variable naming the default threshold of [`RegistryBuilder::from_env`].
pub const LEVEL_ENV: &str = "ROTALOG_LEVEL";

/// The initial state of every [`Logger`](super::Logger) a [`Registry`] creates.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: Severity,
    pub outputs: Outputs,
    pub max_size: u64,
    pub sequence_number: bool,
    pub thread_id: bool,
    /// Truncate the log file the first time it is opened instead of appending to it.
    pub truncate_on_create: bool,
    pub colors: LevelColor,
    pub no_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Severity::Note,
            outputs: Outputs::CONSOLE,
            max_size: DEFAULT_LOG_SIZE,
            sequence_number: true,
            thread_id: false,
            truncate_on_create: false,
            colors: LevelColor::default(),
            no_color: false,
        }
    }
}

/// Builder for a [`Registry`].
///
/// ```
/// use rotalog::Outputs;
/// use rotalog::Registry;
/// use rotalog::Severity;
///
/// let registry = Registry::builder()
///     .default_path("logs/app.log")
///     .level(Severity::Debug)
///     .outputs(Outputs::CONSOLE)
///     .thread_id(true)
///     .build();
/// assert_eq!(registry.default_path().to_str(), Some("logs/app.log"));
/// ```
#[must_use = "call `build` to create the registry"]
#[derive(Debug)]
pub struct RegistryBuilder {
    default_path: PathBuf,
    config: LoggerConfig,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            default_path: PathBuf::from(DEFAULT_LOG_FILE),
            config: LoggerConfig::default(),
        }
    }

    /// Reads [`FILE_ENV`] and [`LEVEL_ENV`] on top of the defaults.
    ///
    /// An unset or empty variable keeps the default. An unparsable level is reported on stderr
    /// and ignored.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Some(path) = std::env::var_os(FILE_ENV).filter(|path| !path.is_empty()) {
            builder.default_path = PathBuf::from(path);
        }
        if let Ok(level) = std::env::var(LEVEL_ENV) {
            if !level.trim().is_empty() {
                match level.parse() {
                    Ok(level) => builder.config.level = level,
                    Err(err) => eprintln!("ignoring {LEVEL_ENV}: {err}"),
                }
            }
        }
        builder
    }

    /// The path used when a logger is requested with an empty path. An empty value is ignored.
    pub fn default_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.as_os_str().is_empty() {
            self.default_path = path;
        }
        self
    }

    pub fn level(mut self, level: Severity) -> Self {
        self.config.level = level;
        self
    }

    /// The outputs new loggers start with. [`Outputs::NONE`] keeps the default.
    pub fn outputs(mut self, outputs: Outputs) -> Self {
        if !outputs.is_empty() {
            self.config.outputs = outputs;
        }
        self
    }

    /// The size a log file may grow to before it is shrunk, at least [`MIN_LOG_SIZE`].
    pub fn max_size(mut self, max_size: u64) -> Self {
        self.config.max_size = max_size.max(MIN_LOG_SIZE);
        self
    }

    pub fn sequence_number(mut self, enabled: bool) -> Self {
        self.config.sequence_number = enabled;
        self
    }

    pub fn thread_id(mut self, enabled: bool) -> Self {
        self.config.thread_id = enabled;
        self
    }

    pub fn truncate_on_create(mut self, enabled: bool) -> Self {
        self.config.truncate_on_create = enabled;
        self
    }

    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.config.colors = colors;
        self
    }

    pub fn no_color(mut self, no_color: bool) -> Self {
        self.config.no_color = no_color;
        self
    }

    pub fn build(self) -> Registry {
        Registry::with_config(self.default_path, self.config)
    }
}
