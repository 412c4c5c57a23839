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

use std::fs::OpenOptions;

/// How a [`FileChannel`](super::FileChannel) accesses its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    #[default]
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl AccessMode {
    fn readable(self) -> bool {
        matches!(self, AccessMode::ReadOnly | AccessMode::ReadWrite)
    }

    fn writable(self) -> bool {
        matches!(self, AccessMode::WriteOnly | AccessMode::ReadWrite)
    }
}

/// Flags and permissions used to open a [`FileChannel`](super::FileChannel).
///
/// ```
/// use rotalog::channel::AccessMode;
/// use rotalog::channel::OpenConfig;
///
/// let config = OpenConfig::new(AccessMode::ReadWrite).create(0o644);
/// assert_eq!(config.mode(), Some(0o644));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenConfig {
    access: AccessMode,
    append: bool,
    truncate: bool,
    mode: Option<u32>,
}

impl OpenConfig {
    #[must_use]
    pub const fn new(access: AccessMode) -> Self {
        Self {
            access,
            append: false,
            truncate: false,
            mode: None,
        }
    }

    /// Every write goes to the end of the file.
    #[must_use]
    pub const fn append(mut self) -> Self {
        self.append = true;
        self
    }

    #[must_use]
    pub const fn truncate(mut self) -> Self {
        self.truncate = true;
        self
    }

    /// Create the file if it does not exist, with the given permission bits.
    ///
    /// The bits are ignored on platforms without Unix permissions.
    #[must_use]
    pub const fn create(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn access(&self) -> AccessMode {
        self.access
    }

    pub fn mode(&self) -> Option<u32> {
        self.mode
    }

    /// Returns a description of the first contradictory flag combination, if any.
    pub(super) fn validate(&self) -> Result<(), &'static str> {
        if (self.append || self.truncate || self.mode.is_some()) && !self.access.writable() {
            return Err("append, truncate and create require write access");
        }
        if self.append && self.truncate {
            return Err("append and truncate are mutually exclusive");
        }
        Ok(())
    }

    pub(super) fn to_open_options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        opts.read(self.access.readable())
            .write(self.access.writable())
            .append(self.append)
            .truncate(self.truncate)
            .create(self.mode.is_some());

        #[cfg(unix)]
        if let Some(mode) = self.mode {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(mode);
        }

        opts
    }
}
