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

use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::ops::ControlFlow;
use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use memmap2::MmapOptions;
use parking_lot::Mutex;
use parking_lot::RwLock;

use super::DEFAULT_CHUNK;
use super::IO_UPPER_BOUND;
use super::MAX_CHUNK;
use super::OpenConfig;
use super::Payload;
use crate::ChannelError;

/// A single OS file handle shared by concurrent readers and writers.
///
/// The filename and the handle sit behind their own reader-writer locks so that `is_open`,
/// `size` and friends never wait on each other, while every read, write and seek syscall is
/// serialized by one mutex. Bulk operations ([`read`](Self::read), [`traverse`](Self::traverse),
/// [`read_chunks`](Self::read_chunks), [`write`](Self::write)) are also mutually exclusive: a
/// second one started while the first is in flight fails fast with [`ChannelError::Busy`].
///
/// Each bulk operation records which file it started on and checks before every syscall that the
/// channel still refers to that file. If the channel was closed, reopened or renamed meanwhile,
/// the operation stops with [`ChannelError::FileChanged`] instead of mixing data from two files.
#[derive(Debug)]
pub struct FileChannel {
    filename: RwLock<PathBuf>,
    handle: RwLock<Handle>,
    io: Mutex<()>,
    busy: AtomicBool,
}

#[derive(Debug, Default)]
struct Handle {
    file: Option<File>,
    // bumped on every open and close
    generation: u64,
    config: Option<OpenConfig>,
}

/// Which file a bulk operation started on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Identity {
    generation: u64,
    filename: PathBuf,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ChannelError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| BusyGuard(flag))
            .map_err(|_| ChannelError::Busy)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FileChannel {
    /// Creates a closed channel for `filename`.
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: RwLock::new(filename.into()),
            handle: RwLock::new(Handle::default()),
            io: Mutex::new(()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn filename(&self) -> PathBuf {
        self.filename.read().clone()
    }

    /// Points the channel at another file, closing the current one if the name differs.
    pub fn set_filename(&self, filename: impl Into<PathBuf>) {
        let filename = filename.into();
        let mut handle = self.handle.write();
        let mut current = self.filename.write();
        if *current != filename {
            if handle.file.take().is_some() {
                handle.generation += 1;
            }
            *current = filename;
        }
    }

    /// The configuration of the last successful [`open`](Self::open).
    pub fn open_config(&self) -> Option<OpenConfig> {
        self.handle.read().config
    }

    pub fn open(&self, config: &OpenConfig) -> Result<(), ChannelError> {
        let mut handle = self.handle.write();
        if handle.file.is_some() {
            return Err(ChannelError::AlreadyOpen);
        }
        let filename = self.filename.read();
        if filename.as_os_str().is_empty() {
            return Err(ChannelError::InvalidFilename);
        }
        config
            .validate()
            .map_err(|reason| ChannelError::InvalidParam(reason.to_string()))?;

        let file = config
            .to_open_options()
            .open(&*filename)
            .map_err(ChannelError::Open)?;
        let _io = self.io.lock();
        handle.file = Some(file);
        handle.generation += 1;
        handle.config = Some(*config);
        Ok(())
    }

    pub fn close(&self) {
        let mut handle = self.handle.write();
        if let Some(file) = handle.file.take() {
            let _io = self.io.lock();
            drop(file);
            handle.generation += 1;
        }
    }

    pub fn is_open(&self) -> bool {
        self.handle.read().file.is_some()
    }

    /// Whether the open file, or the named path when closed, is a directory.
    pub fn is_directory(&self) -> Result<bool, ChannelError> {
        let handle = self.handle.read();
        let metadata = match &handle.file {
            Some(file) => file.metadata(),
            None => std::fs::metadata(&*self.filename.read()),
        };
        metadata
            .map(|metadata| metadata.is_dir())
            .map_err(ChannelError::StatError)
    }

    /// Total size of the open file, or of the named path when closed.
    pub fn size(&self) -> Result<u64, ChannelError> {
        let handle = self.handle.read();
        stat_size(&handle, &self.filename.read())
    }

    /// Current offset of the file cursor.
    pub fn io_position(&self) -> Result<u64, ChannelError> {
        self.seek(SeekFrom::Current(0))
    }

    /// Bytes between the file cursor and the end of the file.
    pub fn io_rest_position(&self) -> Result<u64, ChannelError> {
        let handle = self.handle.read();
        let file = handle.file.as_ref().ok_or(ChannelError::NotOpen)?;
        let _io = self.io.lock();
        let position = seek_file(file, SeekFrom::Current(0))?;
        let total = file.metadata().map_err(ChannelError::StatError)?.len();
        Ok(total.saturating_sub(position))
    }

    pub fn jump_to_begin(&self) -> Result<u64, ChannelError> {
        self.seek(SeekFrom::Start(0))
    }

    /// Moves the cursor by `offset` bytes relative to its current position.
    pub fn jump_to_offset(&self, offset: i64) -> Result<u64, ChannelError> {
        self.seek(SeekFrom::Current(offset))
    }

    /// Moves the cursor to `offset` bytes relative to the end of the file.
    pub fn rjump_to_offset(&self, offset: i64) -> Result<u64, ChannelError> {
        self.seek(SeekFrom::End(offset))
    }

    fn seek(&self, pos: SeekFrom) -> Result<u64, ChannelError> {
        let handle = self.handle.read();
        let file = handle.file.as_ref().ok_or(ChannelError::NotOpen)?;
        let _io = self.io.lock();
        seek_file(file, pos)
    }

    /// Reads from the cursor into a new buffer.
    ///
    /// With `size` of `None` the rest of the file is read. With `check_available` a `size` larger
    /// than what is left is shrunk to fit; otherwise the read may come back short. A request over
    /// [`IO_UPPER_BOUND`] is rejected with [`ChannelError::InvalidParam`].
    pub fn read(&self, size: Option<u64>, check_available: bool) -> Result<Vec<u8>, ChannelError> {
        let _busy = BusyGuard::acquire(&self.busy)?;
        let identity = self.snapshot()?;

        let max_read = match size {
            Some(size) if !check_available => size,
            size => {
                let rest = self.io_rest_position()?;
                size.map_or(rest, |size| size.min(rest))
            }
        };
        if max_read > IO_UPPER_BOUND {
            return Err(ChannelError::InvalidParam(format!(
                "read of {max_read} bytes exceeds the limit of {IO_UPPER_BOUND}"
            )));
        }
        let max_read = usize::try_from(max_read)
            .map_err(|_| ChannelError::InvalidParam(format!("read of {max_read} bytes")))?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(max_read)
            .map_err(|_| ChannelError::NoMem)?;
        buffer.resize(max_read, 0);

        let filled = self.with_file(&identity, |file| {
            let mut filled = 0;
            let mut file = file;
            while filled < max_read {
                match file.read(&mut buffer[filled..]) {
                    Ok(0) => break,
                    Ok(n) => filled += n,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                    Err(err) => return Err(ChannelError::ReadError(err)),
                }
            }
            Ok(filled)
        })?;
        buffer.truncate(filled);
        buffer.shrink_to_fit();
        Ok(buffer)
    }

    /// Walks the file from the cursor in memory-mapped windows of at most `chunk` bytes.
    ///
    /// A `chunk` of zero selects [`DEFAULT_CHUNK`]; larger values are capped at [`MAX_CHUNK`].
    /// At most `limit` bytes are visited, or everything up to the end of the file when `limit` is
    /// `None`. Returning [`ControlFlow::Break`] from `visitor` stops the walk with
    /// [`ChannelError::Cancelled`]. The cursor is left after the last visited byte.
    ///
    /// Only one window is mapped at a time, so memory use is bounded by `chunk` regardless of
    /// the file size. No lock is held while `visitor` runs.
    pub fn traverse<F>(&self, mut visitor: F, chunk: u64, limit: Option<u64>) -> Result<u64, ChannelError>
    where
        F: FnMut(&[u8]) -> ControlFlow<()>,
    {
        let _busy = BusyGuard::acquire(&self.busy)?;
        let identity = self.snapshot()?;

        let (start, rest) = self.with_file(&identity, |file| {
            let start = seek_file(file, SeekFrom::Current(0))?;
            let total = file.metadata().map_err(ChannelError::StatError)?.len();
            Ok((start, total.saturating_sub(start)))
        })?;
        let max_read = limit.map_or(rest, |limit| limit.min(rest));
        let chunk = clamp_chunk(chunk, DEFAULT_CHUNK, MAX_CHUNK).min(max_read);

        let mut total = 0u64;
        while total < max_read {
            let length = chunk.min(max_read - total);
            let window = self.with_file(&identity, |file| {
                let length = usize::try_from(length)
                    .map_err(|_| ChannelError::InvalidParam(format!("window of {length} bytes")))?;
                // SAFETY: the window lies within the file size observed above. The map is
                // private and read-only; concurrent truncation by another process is outside
                // what this channel can guard against.
                let window = unsafe { MmapOptions::new().offset(start + total).len(length).map(file) };
                window.map_err(ChannelError::ReadError)
            })?;
            total += length;
            let flow = visitor(&window);
            drop(window);
            if flow.is_break() {
                self.reposition(&identity, start + total)?;
                return Err(ChannelError::Cancelled { processed: total });
            }
        }

        self.reposition(&identity, start + total)?;
        Ok(total)
    }

    /// Like [`traverse`](Self::traverse), but with a single reusable buffer filled by `read(2)`.
    pub fn read_chunks<F>(&self, mut visitor: F, chunk: u64, limit: Option<u64>) -> Result<u64, ChannelError>
    where
        F: FnMut(&[u8]) -> ControlFlow<()>,
    {
        let _busy = BusyGuard::acquire(&self.busy)?;
        let identity = self.snapshot()?;

        let rest = self.with_file(&identity, |file| {
            let start = seek_file(file, SeekFrom::Current(0))?;
            let total = file.metadata().map_err(ChannelError::StatError)?.len();
            Ok(total.saturating_sub(start))
        })?;
        let max_read = limit.map_or(rest, |limit| limit.min(rest));
        let chunk = clamp_chunk(chunk, IO_UPPER_BOUND, MAX_CHUNK).min(max_read);
        let chunk = usize::try_from(chunk)
            .map_err(|_| ChannelError::InvalidParam(format!("chunk of {chunk} bytes")))?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(chunk)
            .map_err(|_| ChannelError::NoMem)?;
        buffer.resize(chunk, 0);

        let mut total = 0u64;
        while total < max_read {
            let want = (max_read - total).min(chunk as u64) as usize;
            let n = self.with_file(&identity, |mut file| loop {
                match file.read(&mut buffer[..want]) {
                    Ok(n) => return Ok(n),
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                    Err(err) => return Err(ChannelError::ReadError(err)),
                }
            })?;
            if n == 0 {
                break;
            }
            total += n as u64;
            if visitor(&buffer[..n]).is_break() {
                return Err(ChannelError::Cancelled { processed: total });
            }
        }
        Ok(total)
    }

    /// Writes at most `limit` bytes of `data` at the cursor, in syscalls of at most `chunk` bytes.
    ///
    /// A `chunk` of zero selects [`IO_UPPER_BOUND`]. Writing stops early, without error, on a
    /// short or zero-byte write. Returns the number of bytes written.
    pub fn write<P>(&self, data: &P, chunk: u64, limit: Option<u64>) -> Result<u64, ChannelError>
    where
        P: Payload + ?Sized,
    {
        self.write_with(data, chunk, limit, |_, _| ControlFlow::Continue(()))
    }

    /// Like [`write`](Self::write), calling `visitor(written, remaining)` after every chunk.
    ///
    /// Returning [`ControlFlow::Break`] stops with [`ChannelError::Cancelled`].
    pub fn write_with<P, F>(
        &self,
        data: &P,
        chunk: u64,
        limit: Option<u64>,
        mut visitor: F,
    ) -> Result<u64, ChannelError>
    where
        P: Payload + ?Sized,
        F: FnMut(u64, u64) -> ControlFlow<()>,
    {
        let _busy = BusyGuard::acquire(&self.busy)?;
        let identity = self.snapshot()?;

        let bytes = data.bytes();
        let max_write = limit.map_or(bytes.len(), |limit| {
            usize::try_from(limit).map_or(bytes.len(), |limit| limit.min(bytes.len()))
        });
        let chunk = clamp_chunk(chunk, IO_UPPER_BOUND, IO_UPPER_BOUND);
        let chunk = usize::try_from(chunk).unwrap_or(usize::MAX).min(max_write);

        let mut total = 0;
        while total < max_write {
            let want = chunk.min(max_write - total);
            let n = self.with_file(&identity, |mut file| loop {
                match file.write(&bytes[total..total + want]) {
                    Ok(n) => return Ok(n),
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                    Err(err) => return Err(ChannelError::WriteError(err)),
                }
            })?;
            total += n;
            if visitor(total as u64, (max_write - total) as u64).is_break() {
                return Err(ChannelError::Cancelled {
                    processed: total as u64,
                });
            }
            if n < want {
                break;
            }
        }
        Ok(total as u64)
    }

    /// Flushes OS buffers of the open file to disk.
    pub fn sync(&self) -> Result<(), ChannelError> {
        let handle = self.handle.read();
        let file = handle.file.as_ref().ok_or(ChannelError::NotOpen)?;
        let _io = self.io.lock();
        file.sync_data().map_err(ChannelError::WriteError)
    }

    fn snapshot(&self) -> Result<Identity, ChannelError> {
        let handle = self.handle.read();
        if handle.file.is_none() {
            return Err(ChannelError::NotOpen);
        }
        Ok(Identity {
            generation: handle.generation,
            filename: self.filename.read().clone(),
        })
    }

    /// Runs `f` on the open file under the syscall mutex, if it is still the file `identity`
    /// describes.
    fn with_file<T>(
        &self,
        identity: &Identity,
        f: impl FnOnce(&File) -> Result<T, ChannelError>,
    ) -> Result<T, ChannelError> {
        let handle = self.handle.read();
        let file = match &handle.file {
            Some(file) if handle.generation == identity.generation => file,
            _ => return Err(ChannelError::FileChanged),
        };
        if *self.filename.read() != identity.filename {
            return Err(ChannelError::FileChanged);
        }
        let _io = self.io.lock();
        f(file)
    }

    fn reposition(&self, identity: &Identity, offset: u64) -> Result<(), ChannelError> {
        self.with_file(identity, |file| seek_file(file, SeekFrom::Start(offset)).map(|_| ()))
    }
}

impl Drop for FileChannel {
    fn drop(&mut self) {
        self.close();
    }
}

fn seek_file(mut file: &File, pos: SeekFrom) -> Result<u64, ChannelError> {
    file.seek(pos).map_err(ChannelError::SeekError)
}

fn stat_size(handle: &Handle, filename: &Path) -> Result<u64, ChannelError> {
    let metadata = match &handle.file {
        Some(file) => file.metadata(),
        None => std::fs::metadata(filename),
    };
    metadata
        .map(|metadata| metadata.len())
        .map_err(ChannelError::StatError)
}

fn clamp_chunk(chunk: u64, default: u64, max: u64) -> u64 {
    match chunk {
        0 => default,
        chunk => chunk.min(max),
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::TempDir;

    use super::*;
    use crate::channel::AccessMode;

    fn random_bytes(len: usize) -> Vec<u8> {
        rand::rng().sample_iter(&Alphanumeric).take(len).collect()
    }

    fn read_write(dir: &TempDir, name: &str) -> FileChannel {
        let channel = FileChannel::new(dir.path().join(name));
        channel
            .open(&OpenConfig::new(AccessMode::ReadWrite).create(0o644))
            .unwrap();
        channel
    }

    #[test]
    fn test_open_state_machine() {
        let dir = TempDir::new().unwrap();
        let channel = FileChannel::new(dir.path().join("missing.log"));
        assert!(!channel.is_open());
        assert!(matches!(
            channel.open(&OpenConfig::new(AccessMode::ReadOnly)),
            Err(ChannelError::Open(_))
        ));
        assert!(matches!(channel.io_position(), Err(ChannelError::NotOpen)));
        assert!(matches!(channel.read(None, true), Err(ChannelError::NotOpen)));

        let config = OpenConfig::new(AccessMode::WriteOnly).create(0o600);
        channel.open(&config).unwrap();
        assert!(channel.is_open());
        assert_eq!(channel.open_config(), Some(config));
        assert!(matches!(channel.open(&config), Err(ChannelError::AlreadyOpen)));

        channel.close();
        assert!(!channel.is_open());
        channel.close();

        let unnamed = FileChannel::new("");
        assert!(matches!(
            unnamed.open(&config),
            Err(ChannelError::InvalidFilename)
        ));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let channel = read_write(&dir, "data.bin");
        let data = random_bytes(10_000);

        assert_eq!(channel.write(&data, 999, None).unwrap(), 10_000);
        assert_eq!(channel.size().unwrap(), 10_000);
        assert_eq!(channel.io_position().unwrap(), 10_000);
        assert_eq!(channel.io_rest_position().unwrap(), 0);

        channel.jump_to_begin().unwrap();
        assert_eq!(channel.read(None, true).unwrap(), data);

        channel.jump_to_begin().unwrap();
        channel.jump_to_offset(100).unwrap();
        assert_eq!(channel.read(Some(50), false).unwrap(), &data[100..150]);

        assert_eq!(channel.rjump_to_offset(-10).unwrap(), 9_990);
        assert_eq!(channel.read(Some(1_000), true).unwrap(), &data[9_990..]);
    }

    #[test]
    fn test_write_respects_limit() {
        let dir = TempDir::new().unwrap();
        let channel = read_write(&dir, "limit.txt");
        assert_eq!(channel.write("hello world", 0, Some(5)).unwrap(), 5);
        channel.jump_to_begin().unwrap();
        assert_eq!(channel.read(None, true).unwrap(), b"hello");
    }

    #[test]
    fn test_read_rejects_oversized_request() {
        let dir = TempDir::new().unwrap();
        let channel = read_write(&dir, "big.bin");
        assert!(matches!(
            channel.read(Some(IO_UPPER_BOUND + 1), false),
            Err(ChannelError::InvalidParam(_))
        ));
    }

    #[test]
    fn test_traverse_visits_in_chunks() {
        let dir = TempDir::new().unwrap();
        let channel = read_write(&dir, "traverse.bin");
        let data = random_bytes(100_000);
        channel.write(&data, 0, None).unwrap();

        channel.jump_to_begin().unwrap();
        let mut seen = Vec::new();
        let mut windows = 0;
        let total = channel
            .traverse(
                |window| {
                    assert!(window.len() <= 4096);
                    windows += 1;
                    seen.extend_from_slice(window);
                    ControlFlow::Continue(())
                },
                4096,
                None,
            )
            .unwrap();
        assert_eq!(total, 100_000);
        assert_eq!(windows, 25);
        assert_eq!(seen, data);
        assert_eq!(channel.io_position().unwrap(), 100_000);

        // an unaligned start and a limit
        channel.jump_to_begin().unwrap();
        channel.jump_to_offset(12_345).unwrap();
        let mut seen = Vec::new();
        let total = channel
            .traverse(
                |window| {
                    seen.extend_from_slice(window);
                    ControlFlow::Continue(())
                },
                0,
                Some(20_000),
            )
            .unwrap();
        assert_eq!(total, 20_000);
        assert_eq!(seen, &data[12_345..32_345]);
    }

    #[test]
    fn test_traverse_cancel() {
        let dir = TempDir::new().unwrap();
        let channel = read_write(&dir, "cancel.bin");
        channel.write(&random_bytes(10_000), 0, None).unwrap();
        channel.jump_to_begin().unwrap();

        let result = channel.traverse(|_| ControlFlow::Break(()), 1_000, None);
        assert!(matches!(
            result,
            Err(ChannelError::Cancelled { processed: 1_000 })
        ));
        assert_eq!(channel.io_position().unwrap(), 1_000);
    }

    #[test]
    fn test_read_chunks_matches_traverse() {
        let dir = TempDir::new().unwrap();
        let channel = read_write(&dir, "chunks.bin");
        let data = random_bytes(33_333);
        channel.write(&data, 0, None).unwrap();
        channel.jump_to_begin().unwrap();

        let mut seen = Vec::new();
        let total = channel
            .read_chunks(
                |chunk| {
                    seen.extend_from_slice(chunk);
                    ControlFlow::Continue(())
                },
                1_000,
                None,
            )
            .unwrap();
        assert_eq!(total, 33_333);
        assert_eq!(seen, data);
    }

    #[test]
    fn test_close_during_traverse_is_detected() {
        let dir = TempDir::new().unwrap();
        let channel = read_write(&dir, "changed.bin");
        channel.write(&random_bytes(10_000), 0, None).unwrap();
        channel.jump_to_begin().unwrap();

        let mut windows = 0;
        let result = channel.traverse(
            |_| {
                windows += 1;
                channel.close();
                channel
                    .open(&OpenConfig::new(AccessMode::ReadOnly))
                    .unwrap();
                ControlFlow::Continue(())
            },
            1_000,
            None,
        );
        assert!(matches!(result, Err(ChannelError::FileChanged)));
        assert_eq!(windows, 1);
    }

    #[test]
    fn test_rename_during_write_is_detected() {
        let dir = TempDir::new().unwrap();
        let channel = read_write(&dir, "first.bin");
        let other = dir.path().join("second.bin");

        let result = channel.write_with(&random_bytes(10_000), 1_000, None, |written, _| {
            if written == 2_000 {
                channel.set_filename(&other);
            }
            ControlFlow::Continue(())
        });
        assert!(matches!(result, Err(ChannelError::FileChanged)));
        assert!(!channel.is_open());
        assert_eq!(channel.filename(), other);
        assert_eq!(std::fs::metadata(dir.path().join("first.bin")).unwrap().len(), 2_000);
    }

    #[test]
    fn test_write_with_reports_progress_and_cancels() {
        let dir = TempDir::new().unwrap();
        let channel = read_write(&dir, "progress.bin");

        let mut progress = Vec::new();
        let result = channel.write_with("abcdefghij", 4, None, |written, remaining| {
            progress.push((written, remaining));
            if written >= 8 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert!(matches!(result, Err(ChannelError::Cancelled { processed: 8 })));
        assert_eq!(progress, vec![(4, 6), (8, 2)]);
    }

    #[test]
    fn test_nested_io_is_busy() {
        let dir = TempDir::new().unwrap();
        let channel = read_write(&dir, "busy.bin");
        channel.write(&random_bytes(4_096), 0, None).unwrap();
        channel.jump_to_begin().unwrap();

        let mut nested = None;
        channel
            .traverse(
                |_| {
                    nested = Some(channel.read(Some(1), false));
                    ControlFlow::Continue(())
                },
                0,
                None,
            )
            .unwrap();
        assert!(matches!(nested, Some(Err(ChannelError::Busy))));

        // the guard is released afterwards
        channel.jump_to_begin().unwrap();
        assert_eq!(channel.read(Some(1), false).unwrap().len(), 1);
    }

    #[test]
    fn test_is_directory() {
        let dir = TempDir::new().unwrap();
        assert!(FileChannel::new(dir.path()).is_directory().unwrap());
        let channel = read_write(&dir, "plain.txt");
        assert!(!channel.is_directory().unwrap());
        assert!(matches!(
            FileChannel::new(dir.path().join("nope")).is_directory(),
            Err(ChannelError::StatError(_))
        ));
    }
}
