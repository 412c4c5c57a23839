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

use std::fmt::Write;

use jiff::Zoned;

use crate::Severity;
use crate::time::write_timestamp;

/// Where a record was emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Location<'a> {
    pub file: &'a str,
    pub line: Option<u32>,
}

/// Everything that goes into one formatted line besides the message.
#[derive(Debug)]
pub(crate) struct Header<'a> {
    pub sequence: Option<u64>,
    pub now: &'a Zoned,
    pub thread_id: Option<u64>,
    pub level: Severity,
    pub name: Option<&'a str>,
}

/// Formats `[seq][tz date time tid LEVEL][name] message (file+line)` without a line break.
pub(crate) fn format_line(header: &Header<'_>, message: &str, location: Option<Location<'_>>) -> String {
    let mut line = String::with_capacity(message.len() + 64);
    if let Some(sequence) = header.sequence {
        let _ = write!(line, "[{sequence}]");
    }
    line.push('[');
    write_timestamp(&mut line, header.now);
    if let Some(tid) = header.thread_id {
        let _ = write!(line, " {tid}");
    }
    let _ = write!(line, " {}]", header.level);
    if let Some(name) = header.name {
        let _ = write!(line, "[{name}]");
    }
    line.push(' ');
    line.push_str(message);
    if let Some(location) = location {
        let _ = write!(line, " ({}", location.file);
        if let Some(n) = location.line {
            let _ = write!(line, "+{n}");
        }
        line.push(')');
    }
    line
}

/// A stable numeric id for the calling thread.
#[cfg(unix)]
pub(crate) fn current_thread_id() -> u64 {
    // SAFETY: pthread_self has no preconditions and always succeeds.
    let id = unsafe { libc::pthread_self() };
    id as u64
}

#[cfg(not(unix))]
pub(crate) fn current_thread_id() -> u64 {
    use std::sync::atomic::AtomicU64;
    use std::sync::atomic::Ordering;

    static NEXT: AtomicU64 = AtomicU64::new(1);
    thread_local! {
        static ID: u64 = NEXT.fetch_add(1, Ordering::Relaxed);
    }
    ID.with(|id| *id)
}
