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

//! Filesystem helpers for one-time setup work.
//!
//! Unlike the logging path, these helpers report failures as a [`SetupError`] carrying a message
//! and the OS error code.

use std::io;
use std::path::Path;

use crate::SetupError;

/// Creates `path` and all of its missing parents.
///
/// Succeeds if the directory already exists.
pub fn create_dirs(path: impl AsRef<Path>) -> Result<(), SetupError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(SetupError {
            message: "cannot create a directory with an empty path".to_string(),
            code: libc_einval(),
        });
    }
    std::fs::create_dir_all(path).map_err(|err| {
        SetupError::from_io(format!("failed to create directory {}", path.display()), &err)
    })
}

/// Returns the size in bytes of the file at `path`, following symlinks.
pub fn file_size(path: impl AsRef<Path>) -> Result<u64, SetupError> {
    let path = path.as_ref();
    std::fs::metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|err| SetupError::from_io(format!("failed to stat {}", path.display()), &err))
}

/// Returns the permission bits and file type of `path`, as reported by `stat(2)`.
#[cfg(unix)]
pub fn file_mode(path: impl AsRef<Path>) -> Result<u32, SetupError> {
    use std::os::unix::fs::MetadataExt;

    let path = path.as_ref();
    std::fs::metadata(path)
        .map(|metadata| metadata.mode())
        .map_err(|err| SetupError::from_io(format!("failed to stat {}", path.display()), &err))
}

/// Whether anything exists at `path`.
///
/// A missing entry is `Ok(false)`; any other stat failure is an error.
pub fn exists(path: impl AsRef<Path>) -> Result<bool, SetupError> {
    let path = path.as_ref();
    match std::fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(SetupError::from_io(
            format!("failed to stat {}", path.display()),
            &err,
        )),
    }
}

/// Removes a file, a symlink or an empty directory.
pub fn remove(path: impl AsRef<Path>) -> Result<(), SetupError> {
    let path = path.as_ref();
    let metadata = std::fs::symlink_metadata(path)
        .map_err(|err| SetupError::from_io(format!("failed to stat {}", path.display()), &err))?;
    let result = if metadata.is_dir() {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|err| SetupError::from_io(format!("failed to remove {}", path.display()), &err))
}

/// Creates a symbolic link `link` pointing at `target`.
///
/// If `directory` is non-empty, both `target` and `link` are resolved relative to it, so a
/// relative `target` stays relative inside the link. Otherwise they are used as given.
#[cfg(unix)]
pub fn create_symlink(
    directory: impl AsRef<Path>,
    target: impl AsRef<Path>,
    link: impl AsRef<Path>,
) -> Result<(), SetupError> {
    let directory = directory.as_ref();
    let target = target.as_ref();
    let link = if directory.as_os_str().is_empty() {
        link.as_ref().to_path_buf()
    } else {
        directory.join(link)
    };
    std::os::unix::fs::symlink(target, &link).map_err(|err| {
        SetupError::from_io(
            format!(
                "failed to link {} to {}",
                link.display(),
                target.display()
            ),
            &err,
        )
    })
}

#[cfg(unix)]
fn libc_einval() -> i32 {
    libc::EINVAL
}

#[cfg(not(unix))]
fn libc_einval() -> i32 {
    -1
}
