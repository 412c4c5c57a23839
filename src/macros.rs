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

//! Logging macros that tag each line with the calling file and line.
//!
//! The message is only formatted when the logger's threshold admits the level, or when a
//! one-shot threshold is pending. Append errors
//! are discarded; call the [`Logger`](crate::Logger) methods directly to observe them.

#[doc(hidden)]
#[macro_export]
macro_rules! __append {
    ($logger:expr, $level:expr, $name:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        // a pending one-shot threshold is applied and consumed by the append itself
        if logger.once_level().is_some() || logger.is_logable(level) {
            let _ = logger.append_raw(
                $name,
                ::std::option::Option::Some(::std::file!()),
                ::std::option::Option::Some(::std::line!()),
                &::std::format!($($arg)+),
                level,
            );
        }
    }};
}

/// Appends a [`Fatal`](crate::Severity::Fatal) line.
///
/// ```
/// # let logger = rotalog::Registry::new().get_or_create("", rotalog::Outputs::CONSOLE, None);
/// rotalog::fatal!(logger, "cannot continue: {}", "disk full");
/// rotalog::fatal!(logger, name: "storage", "cannot continue");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, name: $name:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Fatal, ::std::option::Option::Some($name), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Fatal, ::std::option::Option::None, $($arg)+)
    };
}

/// Appends an [`Error`](crate::Severity::Error) line. See [`fatal!`](crate::fatal!).
#[macro_export]
macro_rules! error {
    ($logger:expr, name: $name:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Error, ::std::option::Option::Some($name), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Error, ::std::option::Option::None, $($arg)+)
    };
}

/// Appends a [`Warning`](crate::Severity::Warning) line. See [`fatal!`](crate::fatal!).
#[macro_export]
macro_rules! warning {
    ($logger:expr, name: $name:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Warning, ::std::option::Option::Some($name), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Warning, ::std::option::Option::None, $($arg)+)
    };
}

/// Appends a [`Note`](crate::Severity::Note) line. See [`fatal!`](crate::fatal!).
#[macro_export]
macro_rules! note {
    ($logger:expr, name: $name:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Note, ::std::option::Option::Some($name), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Note, ::std::option::Option::None, $($arg)+)
    };
}

/// Appends an [`Info`](crate::Severity::Info) line. See [`fatal!`](crate::fatal!).
#[macro_export]
macro_rules! info {
    ($logger:expr, name: $name:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Info, ::std::option::Option::Some($name), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Info, ::std::option::Option::None, $($arg)+)
    };
}

/// Appends a [`Trace`](crate::Severity::Trace) line. See [`fatal!`](crate::fatal!).
#[macro_export]
macro_rules! trace {
    ($logger:expr, name: $name:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Trace, ::std::option::Option::Some($name), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Trace, ::std::option::Option::None, $($arg)+)
    };
}

/// Appends a [`Debug`](crate::Severity::Debug) line. See [`fatal!`](crate::fatal!).
#[macro_export]
macro_rules! debug {
    ($logger:expr, name: $name:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Debug, ::std::option::Option::Some($name), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Debug, ::std::option::Option::None, $($arg)+)
    };
}

/// Appends a [`Detail`](crate::Severity::Detail) line. See [`fatal!`](crate::fatal!).
#[macro_export]
macro_rules! detail {
    ($logger:expr, name: $name:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Detail, ::std::option::Option::Some($name), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__append!($logger, $crate::Severity::Detail, ::std::option::Option::None, $($arg)+)
    };
}
