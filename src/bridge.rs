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

//! Forwards records of the [`log`] crate to a [`Logger`].

use std::borrow::Cow;
use std::sync::Arc;

use crate::Logger;
use crate::Severity;

/// The default environment variable for filtering records.
pub const DEFAULT_FILTER_ENV: &str = "RUST_LOG";

/// A [`log::Log`] implementation writing to one [`Logger`].
///
/// The record target becomes the name tag of the line and the record's file and line become its
/// source suffix. Records are gated by the logger's threshold and, if set, by an
/// [`env_filter`](https://crates.io/crates/env_filter) directive string.
///
/// ```
/// use rotalog::Outputs;
/// use rotalog::Registry;
/// use rotalog::bridge::LogBridge;
///
/// let logger = Registry::global().get_or_create("", Outputs::CONSOLE, None);
/// LogBridge::new(logger).with_filter("info").unwrap().apply().unwrap();
/// log::info!(target: "startup", "ready");
/// ```
#[derive(Debug)]
pub struct LogBridge {
    logger: Arc<Logger>,
    filter: Option<env_filter::Filter>,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>) -> Self {
        LogBridge {
            logger,
            filter: None,
        }
    }

    /// Only forwards records matching `directives`, e.g. `"warn,my_crate::db=debug"`.
    ///
    /// See [the `env_logger` documentation](https://docs.rs/env_logger/#enabling-logging) for
    /// the syntax.
    pub fn with_filter(mut self, directives: &str) -> anyhow::Result<Self> {
        let mut builder = env_filter::Builder::new();
        builder.try_parse(directives)?;
        self.filter = Some(builder.build());
        Ok(self)
    }

    /// Reads the filter directives from [`DEFAULT_FILTER_ENV`]. An unset variable leaves the
    /// bridge unfiltered.
    pub fn from_default_env(logger: Arc<Logger>) -> Self {
        LogBridge::from_env(logger, DEFAULT_FILTER_ENV)
    }

    /// Reads the filter directives from the variable `name`. An unset variable leaves the
    /// bridge unfiltered; invalid directives are skipped.
    pub fn from_env(logger: Arc<Logger>, name: &str) -> Self {
        let mut bridge = LogBridge::new(logger);
        if let Ok(directives) = std::env::var(name) {
            let mut builder = env_filter::Builder::new();
            builder.parse(&directives);
            bridge.filter = Some(builder.build());
        }
        bridge
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Installs the bridge as the global logger of the [`log`] crate.
    ///
    /// The global maximum level is set to `Trace` so that changes of the logger's threshold take
    /// effect without reinstalling. Call [`log::set_max_level`] afterwards to override it.
    ///
    /// # Errors
    ///
    /// Returns an error if a global logger has already been set.
    pub fn apply(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let admitted = match &self.filter {
            Some(filter) => filter.enabled(metadata),
            None => true,
        };
        admitted && self.logger.is_logable(Severity::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if let Some(filter) = &self.filter {
            if !filter.matches(record) {
                return;
            }
        }

        let message = match record.args().as_str() {
            Some(message) => Cow::Borrowed(message),
            None => Cow::Owned(record.args().to_string()),
        };
        let name = Some(record.target()).filter(|target| !target.is_empty());
        // open and write failures are already reported by the logger
        let _ = self.logger.append_raw(
            name,
            record.file(),
            record.line(),
            &message,
            Severity::from(record.level()),
        );
    }

    fn flush(&self) {
        if let Err(err) = self.logger.flush() {
            eprintln!("failed to flush {}: {err}", self.logger.path().display());
        }
    }
}
