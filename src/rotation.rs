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

use std::ffi::OsString;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Write;
use std::ops::ControlFlow;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;

use crate::ChannelError;
use crate::channel::AccessMode;
use crate::channel::DEFAULT_CHUNK;
use crate::channel::FileChannel;
use crate::channel::OpenConfig;

/// Outcome of a rotation that actually rewrote the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shrunk {
    pub before: u64,
    pub after: u64,
}

/// The sibling file the retained tail is staged in.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".1");
    PathBuf::from(name)
}

/// Caps the log file at `path` to `max_size` bytes.
///
/// When the file is larger than `max_size`, the most recent complete lines that fit in half of it
/// are copied to [`temp_path`], which then replaces the original by rename. `live` is the
/// logger's handle on `path`; it is flushed first and, after a successful rewrite, reopened in
/// append mode on the new file.
///
/// Returns `Ok(None)` when nothing had to be done, including when the file cannot be stat'ed.
/// On error `live` is left open on the original file whenever that is still possible, and the
/// staging file is removed.
pub(crate) fn shrink_to_fit(
    path: &Path,
    max_size: u64,
    live: &mut Option<BufWriter<File>>,
) -> anyhow::Result<Option<Shrunk>> {
    if let Some(writer) = live.as_mut() {
        writer.flush().context("failed to flush log file")?;
    }

    let Ok(metadata) = std::fs::metadata(path) else {
        return Ok(None);
    };
    let before = metadata.len();
    if before <= max_size {
        return Ok(None);
    }

    let staged = TempFile::new(temp_path(path));
    let after = copy_tail(path, staged.path(), max_size / 2)?;
    replace(staged, path, live)?;
    Ok(Some(Shrunk { before, after }))
}

/// Renames `staged` over `path` and reopens `live` on the result.
///
/// If the rename fails, `live` is reopened on the original file and `staged` is removed.
fn replace(
    staged: TempFile,
    path: &Path,
    live: &mut Option<BufWriter<File>>,
) -> anyhow::Result<()> {
    // Close before rename so no handle refers to the replaced file.
    drop(live.take());
    if let Err(err) = std::fs::rename(staged.path(), path) {
        *live = open_append(path).ok().map(BufWriter::new);
        return Err(err).with_context(|| {
            format!(
                "failed to replace {} with {}",
                path.display(),
                staged.path().display()
            )
        });
    }
    staged.disarm();

    let file = open_append(path)
        .with_context(|| format!("failed to reopen log file {}", path.display()))?;
    *live = Some(BufWriter::new(file));
    Ok(())
}

/// Copies the last complete lines of `source`, at most `keep` bytes, into a fresh `target`.
///
/// Both channels are closed when this returns, whatever the outcome.
fn copy_tail(source: &Path, target: &Path, keep: u64) -> anyhow::Result<u64> {
    let reader = FileChannel::new(source);
    reader
        .open(&OpenConfig::new(AccessMode::ReadOnly))
        .with_context(|| format!("failed to open log file {}", source.display()))?;

    // One extra byte tells whether the window starts right after a line break.
    let back = i64::try_from(keep.saturating_add(1)).unwrap_or(i64::MAX);
    if reader.size().context("failed to stat log file")? > keep {
        reader
            .rjump_to_offset(-back)
            .context("failed to seek log file")?;
    }

    match std::fs::remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to remove stale {}", target.display()));
        }
    }
    let writer = FileChannel::new(target);
    writer
        .open(
            &OpenConfig::new(AccessMode::ReadWrite)
                .truncate()
                .create(0o644),
        )
        .with_context(|| format!("failed to create {}", target.display()))?;

    let mut aligned = false;
    let mut written = 0u64;
    let mut failure: Option<ChannelError> = None;
    let traversed = reader.traverse(
        |mut window| {
            if !aligned {
                match window.iter().position(|b| *b == b'\n') {
                    Some(at) => {
                        aligned = true;
                        window = &window[at + 1..];
                    }
                    None => return ControlFlow::Continue(()),
                }
            }
            match writer.write(window, 0, None) {
                Ok(n) if n == window.len() as u64 => {
                    written += n;
                    ControlFlow::Continue(())
                }
                Ok(n) => {
                    failure = Some(ChannelError::WriteError(std::io::Error::new(
                        std::io::ErrorKind::WriteZero,
                        format!("short write of {n} of {} bytes", window.len()),
                    )));
                    ControlFlow::Break(())
                }
                Err(err) => {
                    failure = Some(err);
                    ControlFlow::Break(())
                }
            }
        },
        DEFAULT_CHUNK,
        None,
    );

    if let Some(err) = failure {
        return Err(err).with_context(|| format!("failed to write {}", target.display()));
    }
    traversed.with_context(|| format!("failed to read log file {}", source.display()))?;
    Ok(written)
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Removes the staging file on drop unless disarmed.
struct TempFile {
    path: PathBuf,
    armed: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.armed {
            let _ = crate::fs::remove(&self.path);
        }
    }
}
