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

use std::io;
use std::path::PathBuf;

/// Errors returned by [`FileChannel`](crate::channel::FileChannel) operations.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("file is not open")]
    NotOpen,
    #[error("file is already open")]
    AlreadyOpen,
    #[error("filename is empty")]
    InvalidFilename,
    #[error("invalid parameter: {0}")]
    InvalidParam(String),
    #[error("another read or write is in flight on this file")]
    Busy,
    #[error("file was closed or renamed during the operation")]
    FileChanged,
    #[error("cancelled after {processed} bytes")]
    Cancelled { processed: u64 },
    #[error("failed to allocate the read buffer")]
    NoMem,
    #[error("failed to open file: {0}")]
    Open(#[source] io::Error),
    #[error("failed to read file: {0}")]
    ReadError(#[source] io::Error),
    #[error("failed to write file: {0}")]
    WriteError(#[source] io::Error),
    #[error("failed to stat file: {0}")]
    StatError(#[source] io::Error),
    #[error("failed to seek file: {0}")]
    SeekError(#[source] io::Error),
}

/// Errors returned on the logging path.
///
/// Records filtered out by severity are not errors; see [`Appended`](crate::Appended).
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("logger has no path")]
    NoPath,
    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("file output is enabled but no log file is open")]
    NoFile,
    #[error("failed to write log file: {0}")]
    Write(#[source] io::Error),
}

/// Error raised by the administrative helpers in [`fs`](crate::fs).
///
/// `code` is the OS error number when one is known, `-1` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct SetupError {
    pub message: String,
    pub code: i32,
}

impl SetupError {
    pub(crate) fn from_io(message: impl Into<String>, err: &io::Error) -> Self {
        let message = message.into();
        SetupError {
            message: format!("{message}: {err}"),
            code: err.raw_os_error().unwrap_or(-1),
        }
    }
}
