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

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Write;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use parking_lot::Mutex;
use parking_lot::RwLock;

use super::LoggerConfig;
use super::MIN_LOG_SIZE;
use super::console;
use super::format::Header;
use super::format::Location;
use super::format::current_thread_id;
use super::format::format_line;
use crate::LevelColor;
use crate::LogError;
use crate::Outputs;
use crate::Severity;
use crate::level::UNCHANGED;
use crate::rotation;
use crate::time::Clock;

/// Callback invoked with `(name, level, line)` after a record is appended.
pub type AppendCallback = Arc<dyn Fn(&str, Severity, &str) + Send + Sync>;

// Shared by all loggers so that numbers are unique process-wide.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

const FLUSH_INTERVAL: u64 = 3;
const SHRINK_INTERVAL: u64 = 5;

/// Successful outcome of an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    /// The record reached every enabled output.
    Written,
    /// The record was below the severity threshold and was dropped.
    Filtered,
    /// No output is enabled.
    NoSink,
}

/// A named log destination writing to the console, a file, or both.
///
/// A logger is identified by the path of its file and is normally obtained from a
/// [`Registry`](crate::Registry), which hands out shared references. All methods take `&self`
/// and may be called from any thread; appends to one logger are serialized, appends to
/// different loggers run in parallel.
///
/// The file is opened on the first append that needs it, reopened on the next append after a
/// write failure, and shrunk once it grows past [`max_size`](Self::max_size).
pub struct Logger {
    path: PathBuf,
    level: AtomicU8,
    once_level: AtomicU8,
    outputs: AtomicU8,
    max_size: AtomicU64,
    sequence_number: AtomicBool,
    thread_id: AtomicBool,
    colors: LevelColor,
    no_color: bool,
    clock: Clock,
    sink: Mutex<Sink>,
    callback: RwLock<Option<AppendCallback>>,
    name_filters: RwLock<BTreeSet<String>>,
}

#[derive(Debug, Default)]
struct Sink {
    file: Option<BufWriter<File>>,
    // set by a failed write so that the next append reopens the file
    reopen: bool,
    truncate_next: bool,
    file_writes: u64,
    appends: u64,
}

struct Entry<'a> {
    name: Option<&'a str>,
    location: Option<Location<'a>>,
    message: &'a str,
    level: Severity,
    // no header, no line break
    bare: bool,
}

macro_rules! severity_methods {
    ($($method:ident, $named:ident => $level:ident;)*) => {
        $(
            #[doc = concat!("Appends `message` at [`Severity::", stringify!($level), "`].")]
            pub fn $method(&self, message: impl AsRef<str>) -> Result<Appended, LogError> {
                self.append_raw(None, None, None, message.as_ref(), Severity::$level)
            }

            #[doc = concat!(
                "Appends `message` tagged with `name` at [`Severity::",
                stringify!($level),
                "`]."
            )]
            pub fn $named(&self, name: &str, message: impl AsRef<str>) -> Result<Appended, LogError> {
                self.append_raw(Some(name), None, None, message.as_ref(), Severity::$level)
            }
        )*
    };
}

impl Logger {
    pub(crate) fn new(path: PathBuf, config: &LoggerConfig) -> Self {
        Self::with_clock(path, config, Clock::DefaultClock)
    }

    pub(crate) fn with_clock(path: PathBuf, config: &LoggerConfig, clock: Clock) -> Self {
        Self {
            path,
            level: AtomicU8::new(config.level as u8),
            once_level: AtomicU8::new(UNCHANGED),
            outputs: AtomicU8::new(config.outputs.bits()),
            max_size: AtomicU64::new(config.max_size.max(MIN_LOG_SIZE)),
            sequence_number: AtomicBool::new(config.sequence_number),
            thread_id: AtomicBool::new(config.thread_id),
            colors: config.colors.clone(),
            no_color: config.no_color,
            clock,
            sink: Mutex::new(Sink {
                truncate_next: config.truncate_on_create,
                ..Sink::default()
            }),
            callback: RwLock::new(None),
            name_filters: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> Severity {
        Severity::from_u8(self.level.load(Ordering::Acquire)).unwrap_or(Severity::Note)
    }

    pub fn set_level(&self, level: Severity) {
        self.level.store(level as u8, Ordering::Release);
    }

    /// Makes the threshold one step more verbose, wrapping from the most verbose level back to
    /// [`Severity::Fatal`]. Returns the new threshold.
    pub fn toggle_level(&self) -> Severity {
        let step = |raw: u8| {
            Severity::from_u8(raw)
                .unwrap_or(Severity::Note)
                .next_cyclic()
        };
        let previous = self
            .level
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| Some(step(raw) as u8))
            .unwrap_or_else(|raw| raw);
        step(previous)
    }

    /// The one-shot threshold the next append will be gated against, if any.
    pub fn once_level(&self) -> Option<Severity> {
        Severity::from_u8(self.once_level.load(Ordering::Acquire))
    }

    /// Gates the next append against `level` instead of the persistent threshold.
    ///
    /// The override is consumed by that append, whether it is written or filtered. `None`
    /// clears a pending override.
    pub fn set_once_level(&self, level: Option<Severity>) {
        self.once_level
            .store(Severity::to_raw(level), Ordering::Release);
    }

    pub fn outputs(&self) -> Outputs {
        Outputs::from_bits(self.outputs.load(Ordering::Acquire))
    }

    /// Replaces the output set. Unlike the registry overrides, [`Outputs::NONE`] here disables
    /// all outputs.
    ///
    /// Removing [`Outputs::FILE`] flushes and closes the log file.
    pub fn set_outputs(&self, outputs: Outputs) {
        let mut sink = self.sink.lock();
        self.outputs.store(outputs.bits(), Ordering::Release);
        if !outputs.has_file() {
            close_sink(&mut sink);
        }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size.load(Ordering::Relaxed)
    }

    /// Sets the size the file may reach before it is shrunk.
    ///
    /// A negative value is ignored; anything below [`MIN_LOG_SIZE`] is raised to it.
    pub fn set_max_size(&self, max_size: i64) {
        if let Ok(max_size) = u64::try_from(max_size) {
            self.max_size
                .store(max_size.max(MIN_LOG_SIZE), Ordering::Relaxed);
        }
    }

    pub fn enable_sequence_number(&self, enabled: bool) {
        self.sequence_number.store(enabled, Ordering::Relaxed);
    }

    pub fn has_sequence_number(&self) -> bool {
        self.sequence_number.load(Ordering::Relaxed)
    }

    pub fn enable_thread_id(&self, enabled: bool) {
        self.thread_id.store(enabled, Ordering::Relaxed);
    }

    pub fn has_thread_id(&self) -> bool {
        self.thread_id.load(Ordering::Relaxed)
    }

    /// Whether the persistent threshold admits `level`.
    pub fn is_logable(&self, level: Severity) -> bool {
        self.level() >= level
    }

    /// Installs the callback run after each append whose name is in the name filter.
    ///
    /// The filter starts empty, so nothing is delivered until [`add_name_filter`] is called.
    /// Records without a name are matched by the empty name. A panicking callback is ignored.
    ///
    /// [`add_name_filter`]: Self::add_name_filter
    pub fn set_append_callback<F>(&self, callback: F)
    where
        F: Fn(&str, Severity, &str) + Send + Sync + 'static,
    {
        *self.callback.write() = Some(Arc::new(callback));
    }

    pub fn clear_append_callback(&self) {
        *self.callback.write() = None;
    }

    /// Returns `false` if `name` was already present.
    pub fn add_name_filter(&self, name: impl Into<String>) -> bool {
        self.name_filters.write().insert(name.into())
    }

    /// Returns `false` if `name` was not present.
    pub fn remove_name_filter(&self, name: &str) -> bool {
        self.name_filters.write().remove(name)
    }

    pub fn clear_name_filters(&self) {
        self.name_filters.write().clear();
    }

    pub fn has_name_filter(&self, name: &str) -> bool {
        self.name_filters.read().contains(name)
    }

    /// The filtered names in sorted order.
    pub fn name_filters(&self) -> Vec<String> {
        self.name_filters.read().iter().cloned().collect()
    }

    severity_methods! {
        fatal, fatal_named => Fatal;
        error, error_named => Error;
        warning, warning_named => Warning;
        note, note_named => Note;
        info, info_named => Info;
        trace, trace_named => Trace;
        debug, debug_named => Debug;
        detail, detail_named => Detail;
    }

    /// Appends one formatted line.
    ///
    /// `file` and `line` are rendered as a ` (file+line)` suffix; `line` is only shown together
    /// with `file`.
    pub fn append_raw(
        &self,
        name: Option<&str>,
        file: Option<&str>,
        line: Option<u32>,
        message: &str,
        level: Severity,
    ) -> Result<Appended, LogError> {
        self.log_entry(Entry {
            name,
            location: file.map(|file| Location { file, line }),
            message,
            level,
            bare: false,
        })
    }

    /// Appends `message` verbatim: no header, no location and no trailing line break.
    ///
    /// Gating, outputs and the append callback work as for [`append_raw`](Self::append_raw);
    /// the callback sees an empty name.
    pub fn append_message(&self, message: &str, level: Severity) -> Result<Appended, LogError> {
        self.log_entry(Entry {
            name: None,
            location: None,
            message,
            level,
            bare: true,
        })
    }

    /// Appends a line at the current threshold and returns `self` for chaining.
    ///
    /// ```
    /// # use rotalog::{Outputs, Registry};
    /// let registry = Registry::new();
    /// let logger = registry.get_or_create("", Outputs::CONSOLE, None);
    /// logger.push("starting").push(format_args!("{} workers", 4));
    /// ```
    pub fn push(&self, message: impl fmt::Display) -> &Self {
        let message = message.to_string();
        let _ = self.append_raw(None, None, None, &message, self.level());
        self
    }

    /// Like [`push`](Self::push), appending the message verbatim.
    pub fn push_raw(&self, message: impl fmt::Display) -> &Self {
        let message = message.to_string();
        let _ = self.append_message(&message, self.level());
        self
    }

    /// Closes the file and, if file output is enabled, opens it again.
    ///
    /// With `truncate` the file is emptied, otherwise appended to. Missing parent directories
    /// are created; failing to create them is reported on stderr but does not fail the call.
    pub fn reset(&self, truncate: bool) -> Result<(), LogError> {
        let mut sink = self.sink.lock();
        self.open_sink(&mut sink, truncate)?;
        self.shrink_locked(&mut sink);
        Ok(())
    }

    /// Shrinks the file now if it is over [`max_size`](Self::max_size).
    pub fn shrink_to_fit(&self) {
        let mut sink = self.sink.lock();
        self.shrink_locked(&mut sink);
    }

    pub fn flush(&self) -> Result<(), LogError> {
        let mut sink = self.sink.lock();
        match sink.file.as_mut() {
            Some(writer) => writer.flush().map_err(LogError::Write),
            None => Ok(()),
        }
    }

    /// Flushes and closes the file. A later append opens it again.
    pub fn finish(&self) {
        let mut sink = self.sink.lock();
        close_sink(&mut sink);
    }

    fn log_entry(&self, entry: Entry<'_>) -> Result<Appended, LogError> {
        if self.path.as_os_str().is_empty() {
            return Err(LogError::NoPath);
        }
        if !self.admit(entry.level) {
            return Ok(Appended::Filtered);
        }
        let outputs = self.outputs();
        if outputs.is_empty() {
            return Ok(Appended::NoSink);
        }

        let mut sink = self.sink.lock();
        if outputs.has_file() && (sink.file.is_none() || sink.reopen) {
            let truncate = sink.truncate_next;
            match self.open_sink(&mut sink, truncate) {
                Ok(()) => self.shrink_locked(&mut sink),
                Err(err) => {
                    eprintln!("{err}");
                    if !outputs.has_console() {
                        return Err(err);
                    }
                }
            }
        }

        let line = if entry.bare {
            Cow::Borrowed(entry.message)
        } else {
            let now = self.clock.now();
            let header = Header {
                sequence: self
                    .has_sequence_number()
                    .then(|| SEQUENCE.fetch_add(1, Ordering::Relaxed) + 1),
                now: &now,
                thread_id: self.has_thread_id().then(current_thread_id),
                level: entry.level,
                name: entry.name,
            };
            Cow::Owned(format_line(&header, entry.message, entry.location))
        };

        if outputs.has_console() {
            console::print(&self.colors, self.no_color, entry.level, &line, !entry.bare);
        }
        let result = if outputs.has_file() {
            write_sink(&mut sink, &line, !entry.bare)
        } else {
            Ok(Appended::Written)
        };
        if result.is_ok() {
            sink.appends += 1;
            if sink.appends % SHRINK_INTERVAL == 0 {
                self.shrink_locked(&mut sink);
            }
        }
        drop(sink);

        self.notify(entry.name.unwrap_or(""), entry.level, &line);
        result
    }

    /// Consumes a pending one-shot override and gates `level` against it, or against the
    /// persistent threshold when there is none.
    fn admit(&self, level: Severity) -> bool {
        let once = self.once_level.swap(UNCHANGED, Ordering::AcqRel);
        let threshold = Severity::from_u8(once).unwrap_or_else(|| self.level());
        threshold >= level
    }

    fn open_sink(&self, sink: &mut Sink, truncate: bool) -> Result<(), LogError> {
        if self.path.as_os_str().is_empty() {
            return Err(LogError::NoPath);
        }
        close_sink(sink);
        sink.reopen = false;
        if !self.outputs().has_file() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(err) = crate::fs::create_dirs(parent) {
                eprintln!("failed to create log directory: {err}");
            }
        }

        let mut opts = OpenOptions::new();
        opts.create(true);
        if truncate {
            opts.write(true).truncate(true);
        } else {
            opts.append(true);
        }
        let file = opts.open(&self.path).map_err(|source| LogError::Open {
            path: self.path.clone(),
            source,
        })?;
        sink.file = Some(BufWriter::new(file));
        sink.truncate_next = false;
        Ok(())
    }

    fn shrink_locked(&self, sink: &mut Sink) {
        if sink.file.is_none() {
            return;
        }
        if let Err(err) = rotation::shrink_to_fit(&self.path, self.max_size(), &mut sink.file) {
            eprintln!(
                "failed to shrink log file {}: {err:#}",
                self.path.display()
            );
        }
    }

    fn notify(&self, name: &str, level: Severity, line: &str) {
        let Some(callback) = self.callback.read().clone() else {
            return;
        };
        if !self.name_filters.read().contains(name) {
            return;
        }
        let _ = std::panic::catch_unwind(AssertUnwindSafe(|| callback(name, level, line)));
    }
}

fn write_sink(sink: &mut Sink, line: &str, newline: bool) -> Result<Appended, LogError> {
    let Some(writer) = sink.file.as_mut() else {
        return Err(LogError::NoFile);
    };
    let mut written = writer.write_all(line.as_bytes());
    if newline {
        written = written.and_then(|()| writer.write_all(b"\n"));
    }
    if written.is_ok() {
        sink.file_writes += 1;
        if sink.file_writes % FLUSH_INTERVAL == 0 {
            written = writer.flush();
        }
    }
    written.map(|()| Appended::Written).map_err(|err| {
        sink.reopen = true;
        LogError::Write(err)
    })
}

fn close_sink(sink: &mut Sink) {
    if let Some(mut writer) = sink.file.take() {
        if let Err(err) = writer.flush() {
            eprintln!("failed to flush log file: {err}");
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        close_sink(self.sink.get_mut());
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("level", &self.level())
            .field("once_level", &self.once_level())
            .field("outputs", &self.outputs())
            .field("max_size", &self.max_size())
            .field("sequence_number", &self.has_sequence_number())
            .field("thread_id", &self.has_thread_id())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::atomic::AtomicUsize;

    use jiff::Zoned;
    use tempfile::TempDir;

    use super::*;
    use crate::time::ManualClock;

    fn file_logger(dir: &TempDir) -> Logger {
        let config = LoggerConfig {
            outputs: Outputs::FILE,
            sequence_number: false,
            ..LoggerConfig::default()
        };
        let now = Zoned::from_str("2024-08-10T17:12:52.000000001+08:00[+08:00]").unwrap();
        Logger::with_clock(
            dir.path().join("logs/test.log"),
            &config,
            Clock::ManualClock(ManualClock::new(now)),
        )
    }

    fn contents(logger: &Logger) -> String {
        logger.flush().unwrap();
        std::fs::read_to_string(logger.path()).unwrap_or_default()
    }

    #[test]
    fn test_level_gating() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.set_level(Severity::Info);

        for level in Severity::ALL {
            let appended = logger.append_raw(None, None, None, level.as_str(), level).unwrap();
            if level <= Severity::Info {
                assert_eq!(appended, Appended::Written);
            } else {
                assert_eq!(appended, Appended::Filtered);
            }
        }

        let content = contents(&logger);
        assert_eq!(content.lines().count(), 5);
        assert!(content.contains("INFO] INFO"));
        assert!(!content.contains("TRACE"));
    }

    #[test]
    fn test_line_format_in_file() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger
            .append_raw(Some("net"), Some("src/net.rs"), Some(7), "connected", Severity::Warning)
            .unwrap();
        logger.note("plain").unwrap();
        assert_eq!(
            contents(&logger),
            "[08 2024-08-10 17:12:52.000000001 WARNING][net] connected (src/net.rs+7)\n\
             [08 2024-08-10 17:12:52.000000001 NOTE] plain\n"
        );
    }

    #[test]
    fn test_bare_message_has_no_header() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.append_message("a", Severity::Note).unwrap();
        logger.push_raw("b").push_raw(1);
        assert_eq!(
            logger.append_message("c", Severity::Debug).unwrap(),
            Appended::Filtered
        );
        assert_eq!(contents(&logger), "ab1");
    }

    #[test]
    fn test_one_shot_override_applies_once() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.set_level(Severity::Warning);

        logger.set_once_level(Some(Severity::Debug));
        assert_eq!(logger.once_level(), Some(Severity::Debug));
        assert_eq!(logger.debug("first").unwrap(), Appended::Written);
        assert_eq!(logger.once_level(), None);
        assert_eq!(logger.debug("second").unwrap(), Appended::Filtered);

        logger.set_once_level(Some(Severity::Fatal));
        assert_eq!(logger.error("third").unwrap(), Appended::Filtered);
        assert_eq!(logger.error("fourth").unwrap(), Appended::Written);

        let content = contents(&logger);
        assert!(content.contains("first"));
        assert!(!content.contains("second"));
        assert!(!content.contains("third"));
        assert!(content.contains("fourth"));
    }

    #[test]
    fn test_max_size_clamp() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        let initial = logger.max_size();
        logger.set_max_size(-1);
        assert_eq!(logger.max_size(), initial);
        logger.set_max_size(0);
        assert_eq!(logger.max_size(), MIN_LOG_SIZE);
        logger.set_max_size(MIN_LOG_SIZE as i64 - 1);
        assert_eq!(logger.max_size(), MIN_LOG_SIZE);
        logger.set_max_size(100_000);
        assert_eq!(logger.max_size(), 100_000);
    }

    #[test]
    fn test_toggle_level_wraps() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.set_level(Severity::Debug);
        assert_eq!(logger.toggle_level(), Severity::Detail);
        assert_eq!(logger.toggle_level(), Severity::Fatal);
        assert_eq!(logger.level(), Severity::Fatal);
    }

    #[test]
    fn test_no_sink_and_no_path() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.set_outputs(Outputs::NONE);
        assert_eq!(logger.note("x").unwrap(), Appended::NoSink);
        assert!(!logger.path().exists());

        let unnamed = Logger::new(PathBuf::new(), &LoggerConfig::default());
        assert!(matches!(unnamed.note("x"), Err(LogError::NoPath)));
        assert!(matches!(unnamed.reset(false), Err(LogError::NoPath)));
    }

    #[test]
    fn test_dropping_file_output_closes_the_file() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.note("buffered").unwrap();
        assert!(logger.sink.lock().file.is_some());

        logger.set_outputs(Outputs::CONSOLE);
        assert!(logger.sink.lock().file.is_none());
        assert!(contents(&logger).contains("buffered"));

        logger.note("console only").unwrap();
        assert!(logger.sink.lock().file.is_none());
        assert!(!contents(&logger).contains("console only"));

        logger.set_outputs(Outputs::FILE);
        logger.note("back on file").unwrap();
        assert!(logger.sink.lock().file.is_some());
        assert!(contents(&logger).contains("back on file"));
    }

    #[test]
    fn test_file_only_open_failure_is_an_error() {
        let dir = TempDir::new().unwrap();
        // a directory where the log file should be
        std::fs::create_dir_all(dir.path().join("logs/test.log")).unwrap();
        let logger = file_logger(&dir);
        assert!(matches!(logger.note("x"), Err(LogError::Open { .. })));

        logger.set_outputs(Outputs::BOTH);
        assert!(matches!(logger.note("x"), Err(LogError::NoFile)));
    }

    #[test]
    fn test_reset_truncates_and_is_noop_without_file_output() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.note("old").unwrap();
        logger.reset(false).unwrap();
        logger.note("kept").unwrap();
        assert!(contents(&logger).contains("old"));

        logger.reset(true).unwrap();
        logger.note("new").unwrap();
        let content = contents(&logger);
        assert!(!content.contains("old"));
        assert!(content.contains("new"));

        logger.set_outputs(Outputs::CONSOLE);
        logger.reset(true).unwrap();
        assert!(contents(&logger).contains("new"));
    }

    #[test]
    fn test_file_is_reopened_after_finish_and_removal() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.note("one").unwrap();
        logger.finish();
        std::fs::remove_file(logger.path()).unwrap();

        logger.note("two").unwrap();
        let content = contents(&logger);
        assert!(!content.contains("one"));
        assert!(content.contains("two"));
    }

    #[test]
    fn test_callback_respects_name_filter() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        logger.set_append_callback(move |name, level, line| {
            sink.lock().push((name.to_string(), level, line.to_string()));
        });

        logger.note_named("a", "ignored while filter is empty").unwrap();
        assert!(seen.lock().is_empty());

        assert!(logger.add_name_filter("a"));
        assert!(!logger.add_name_filter("a"));
        logger.note_named("b", "never delivered").unwrap();
        logger.note_named("a", "delivered").unwrap();
        logger.note("unnamed").unwrap();

        let seen = seen.lock().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "a");
        assert_eq!(seen[0].1, Severity::Note);
        assert_eq!(
            seen[0].2,
            "[08 2024-08-10 17:12:52.000000001 NOTE][a] delivered"
        );
        assert!(contents(&logger).contains(&seen[0].2));

        assert!(logger.add_name_filter(""));
        assert_eq!(logger.name_filters(), vec!["".to_string(), "a".to_string()]);
        assert!(logger.remove_name_filter("a"));
        assert!(!logger.remove_name_filter("a"));
        assert!(logger.has_name_filter(""));
        logger.clear_name_filters();
        assert!(logger.name_filters().is_empty());
    }

    #[test]
    fn test_unnamed_records_match_empty_filter() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        logger.set_append_callback(move |name, _, _| {
            assert_eq!(name, "");
            counter.fetch_add(1, Ordering::SeqCst);
        });
        logger.add_name_filter("");
        logger.info("ignored by level").unwrap();
        logger.note("one").unwrap();
        logger.append_message("two", Severity::Error).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_panicking_callback_is_contained() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.set_append_callback(|_, _, _| panic!("callback failure"));
        logger.add_name_filter("x");
        assert_eq!(logger.note_named("x", "still written").unwrap(), Appended::Written);
        assert!(contents(&logger).contains("still written"));
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.enable_sequence_number(true);
        for _ in 0..10 {
            logger.note("tick").unwrap();
        }
        let numbers: Vec<u64> = contents(&logger)
            .lines()
            .map(|line| {
                let end = line.find(']').unwrap();
                line[1..end].parse().unwrap()
            })
            .collect();
        assert_eq!(numbers.len(), 10);
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rotation_keeps_file_bounded() {
        let dir = TempDir::new().unwrap();
        let logger = file_logger(&dir);
        logger.set_max_size(0);
        let message = "x".repeat(200);
        for _ in 0..500 {
            logger.note(&message).unwrap();
        }
        logger.shrink_to_fit();
        let content = contents(&logger);
        assert!(content.len() as u64 <= MIN_LOG_SIZE);
        assert!(content.lines().all(|line| line.ends_with(&message)));
    }
}
