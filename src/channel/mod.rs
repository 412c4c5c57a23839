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

//! Chunked file I/O on a shared handle.
//!
//! A [`FileChannel`] wraps one OS file that many threads may read, write and seek at once. It is
//! the building block the rotation of log files is made of, but is usable on its own:
//!
//! ```
//! use std::ops::ControlFlow;
//!
//! use rotalog::channel::AccessMode;
//! use rotalog::channel::FileChannel;
//! use rotalog::channel::OpenConfig;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let channel = FileChannel::new(dir.path().join("data.txt"));
//! channel
//!     .open(&OpenConfig::new(AccessMode::ReadWrite).create(0o644))
//!     .unwrap();
//! channel.write("line one\nline two\n", 0, None).unwrap();
//!
//! channel.jump_to_begin().unwrap();
//! let mut lines = 0;
//! channel
//!     .traverse(
//!         |window| {
//!             lines += window.iter().filter(|b| **b == b'\n').count();
//!             ControlFlow::Continue(())
//!         },
//!         0,
//!         None,
//!     )
//!     .unwrap();
//! assert_eq!(lines, 2);
//! ```

mod config;
mod file;
mod payload;

pub use self::config::AccessMode;
pub use self::config::OpenConfig;
pub use self::file::FileChannel;
pub use self::payload::Payload;

const MIB: u64 = 1024 * 1024;
const WORD: u64 = size_of::<usize>() as u64;

/// Largest single read or write a channel performs.
pub const IO_UPPER_BOUND: u64 = WORD * 128 * MIB;

/// Window size used by [`FileChannel::traverse`] when none is given.
pub const DEFAULT_CHUNK: u64 = WORD * 16 * MIB;

/// Largest window [`FileChannel::traverse`] maps at once.
pub const MAX_CHUNK: u64 = WORD * 512 * MIB;
