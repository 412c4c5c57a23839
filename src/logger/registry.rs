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

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::LazyLock;

use parking_lot::RwLock;

use super::Logger;
use super::LoggerConfig;
use super::RegistryBuilder;
use crate::Outputs;
use crate::Severity;

static GLOBAL: LazyLock<Registry> = LazyLock::new(|| {
    let registry = RegistryBuilder::from_env().build();
    close_global_at_exit();
    registry
});

// The global registry is never dropped, so its buffered lines are written out by an exit hook.
#[cfg(unix)]
fn close_global_at_exit() {
    extern "C" fn close_global() {
        let _ = std::panic::catch_unwind(AssertUnwindSafe(|| Registry::global().close_all()));
    }

    // SAFETY: `close_global` takes no arguments and never unwinds into the caller.
    if unsafe { libc::atexit(close_global) } != 0 {
        eprintln!("failed to register the log flush at exit");
    }
}

// TODO: flush the global registry at exit on non-unix targets.
#[cfg(not(unix))]
fn close_global_at_exit() {}

/// A map from file path to shared [`Logger`].
///
/// Lookups take a shared lock and run concurrently; creating and releasing loggers take an
/// exclusive one. A logger handed out stays usable after it is [released](Self::release) from
/// the registry, until the last reference is dropped.
#[derive(Debug)]
pub struct Registry {
    loggers: RwLock<HashMap<PathBuf, Arc<Logger>>>,
    default_path: RwLock<PathBuf>,
    config: LoggerConfig,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry with the default configuration.
    pub fn new() -> Self {
        RegistryBuilder::new().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn with_config(default_path: PathBuf, config: LoggerConfig) -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
            default_path: RwLock::new(default_path),
            config,
        }
    }

    /// The process-wide registry, built from [`RegistryBuilder::from_env`] on first use.
    ///
    /// On unix its loggers are flushed and closed when the process exits normally.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Returns the logger for `path`, creating it on first request.
    ///
    /// An empty `path` stands for the [default path](Self::default_path). A non-empty `outputs`
    /// replaces the logger's outputs, and `once` sets its one-shot threshold; both apply to new
    /// and existing loggers alike.
    pub fn get_or_create(
        &self,
        path: impl AsRef<Path>,
        outputs: Outputs,
        once: Option<Severity>,
    ) -> Arc<Logger> {
        let path = self.resolve(path.as_ref());
        let found = self.loggers.read().get(&path).cloned();
        let logger = match found {
            Some(logger) => logger,
            None => self
                .loggers
                .write()
                .entry(path)
                .or_insert_with_key(|path| Arc::new(Logger::new(path.clone(), &self.config)))
                .clone(),
        };

        if !outputs.is_empty() {
            logger.set_outputs(outputs);
        }
        if once.is_some() {
            logger.set_once_level(once);
        }
        logger
    }

    /// Returns the logger for `path` if one exists.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Arc<Logger>> {
        let path = self.resolve(path.as_ref());
        self.loggers.read().get(&path).cloned()
    }

    /// Removes the logger for `path` from the registry and returns it.
    ///
    /// The next [`get_or_create`](Self::get_or_create) for the same path builds a new logger.
    pub fn release(&self, path: impl AsRef<Path>) -> Option<Arc<Logger>> {
        let path = self.resolve(path.as_ref());
        self.loggers.write().remove(&path)
    }

    pub fn default_path(&self) -> PathBuf {
        self.default_path.read().clone()
    }

    /// Changes the path used for empty requests. An empty `path` is ignored.
    ///
    /// Loggers already created for the previous default path are kept under that path.
    pub fn set_default_path(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !path.as_os_str().is_empty() {
            *self.default_path.write() = path;
        }
    }

    /// The number of registered loggers.
    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    pub fn fatal(&self, path: impl AsRef<Path>, outputs: Outputs) -> Arc<Logger> {
        self.get_or_create(path, outputs, Some(Severity::Fatal))
    }

    pub fn error(&self, path: impl AsRef<Path>, outputs: Outputs) -> Arc<Logger> {
        self.get_or_create(path, outputs, Some(Severity::Error))
    }

    pub fn warning(&self, path: impl AsRef<Path>, outputs: Outputs) -> Arc<Logger> {
        self.get_or_create(path, outputs, Some(Severity::Warning))
    }

    pub fn note(&self, path: impl AsRef<Path>, outputs: Outputs) -> Arc<Logger> {
        self.get_or_create(path, outputs, Some(Severity::Note))
    }

    pub fn info(&self, path: impl AsRef<Path>, outputs: Outputs) -> Arc<Logger> {
        self.get_or_create(path, outputs, Some(Severity::Info))
    }

    pub fn trace(&self, path: impl AsRef<Path>, outputs: Outputs) -> Arc<Logger> {
        self.get_or_create(path, outputs, Some(Severity::Trace))
    }

    pub fn debug(&self, path: impl AsRef<Path>, outputs: Outputs) -> Arc<Logger> {
        self.get_or_create(path, outputs, Some(Severity::Debug))
    }

    pub fn detail(&self, path: impl AsRef<Path>, outputs: Outputs) -> Arc<Logger> {
        self.get_or_create(path, outputs, Some(Severity::Detail))
    }

    /// Flushes every registered logger, reporting failures on stderr.
    pub fn flush_all(&self) {
        for logger in self.snapshot() {
            if let Err(err) = logger.flush() {
                eprintln!("failed to flush {}: {err}", logger.path().display());
            }
        }
    }

    /// Flushes and closes the files of every registered logger. They reopen on the next append.
    pub fn close_all(&self) {
        for logger in self.snapshot() {
            logger.finish();
        }
    }

    fn snapshot(&self) -> Vec<Arc<Logger>> {
        self.loggers.read().values().cloned().collect()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.as_os_str().is_empty() {
            self.default_path()
        } else {
            path.to_path_buf()
        }
    }
}
