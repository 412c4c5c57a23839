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

//! Rotalog provides named loggers that many threads can write to at once, each spooling
//! formatted lines to the console and/or a size-capped file.
//!
//! # Overview
//!
//! Loggers are identified by their file path and live in a [`Registry`]. The first
//! [`Registry::get_or_create`] call for a path builds the [`Logger`]; later calls return the same
//! shared instance. The log file is created lazily, reopened after write failures, and shrunk in
//! place once it grows past the configured maximum size.
//!
//! # Examples
//!
//! Log to the console through the process-wide registry:
//!
//! ```
//! use rotalog::Outputs;
//! use rotalog::Registry;
//! use rotalog::Severity;
//!
//! let logger = Registry::global().get_or_create("", Outputs::CONSOLE, None);
//! logger.set_level(Severity::Info);
//! logger.info("This is an info message.").unwrap();
//! logger.error_named("db", "Connection refused.").unwrap();
//! ```
//!
//! Log to a file whose size is capped at 64 KiB:
//!
//! ```
//! use rotalog::Outputs;
//! use rotalog::Registry;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let registry = Registry::builder()
//!     .default_path(dir.path().join("app.log"))
//!     .outputs(Outputs::FILE)
//!     .max_size(64 * 1024)
//!     .build();
//!
//! let logger = registry.get_or_create("", Outputs::NONE, None);
//! rotalog::note!(logger, "started with {} workers", 4);
//! registry.close_all();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bridge;
pub mod channel;
pub mod fs;

mod color;
mod error;
mod level;
mod logger;
mod macros;
mod output;
mod rotation;
mod time;

pub use self::color::LevelColor;
pub use self::color::Style;
pub use self::error::ChannelError;
pub use self::error::LogError;
pub use self::error::SetupError;
pub use self::level::ParseSeverityError;
pub use self::level::Severity;
pub use self::logger::*;
pub use self::output::Outputs;
