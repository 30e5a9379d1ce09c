// Copyright 2025 Lablup Inc. and Jeongkyu Shin
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

//! Copy and move of files and directory trees.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, IoResultExt, Result};

/// Copy `source` to `destination`.
///
/// A directory source is copied recursively and the destination must not
/// exist yet. A file source keeps its permission bits and timestamps; if
/// `destination` is an existing directory the file lands inside it.
pub fn copy_file_or_directory(source: &Path, destination: &Path) -> Result<String> {
    if source.is_dir() {
        if destination.symlink_metadata().is_ok() {
            return Err(Error::AlreadyExists(destination.to_path_buf()));
        }
        copy_tree(source, destination)?;
        tracing::info!("Copied directory {:?} to {:?}", source, destination);
    } else {
        let target = target_inside_directory(source, destination);
        copy_file_with_metadata(source, &target)?;
        tracing::info!("Copied file {:?} to {:?}", source, target);
    }
    Ok("Copied successfully".to_string())
}

/// Move `source` to `destination`.
///
/// Renames when source and destination share a filesystem, otherwise copies
/// then deletes the source. If `destination` is an existing directory the
/// source is moved into it.
pub fn move_file_or_directory(source: &Path, destination: &Path) -> Result<String> {
    let metadata = source.symlink_metadata().at_path(source)?;

    let target = target_inside_directory(source, destination);
    if target != destination && target.symlink_metadata().is_ok() {
        return Err(Error::AlreadyExists(target));
    }

    match fs::rename(source, &target) {
        Ok(()) => {
            tracing::info!("Renamed {:?} to {:?}", source, target);
        }
        Err(e) if is_cross_device(&e) => {
            tracing::debug!(
                "{:?} and {:?} are on different filesystems, copying instead",
                source,
                target
            );
            copy_then_remove(source, &target, &metadata)?;
            tracing::info!("Moved {:?} to {:?}", source, target);
        }
        Err(e) => return Err(Error::from_io(source, e)),
    }

    Ok("Moved successfully".to_string())
}

/// `destination/<name of source>` when `destination` is a directory.
fn target_inside_directory(source: &Path, destination: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) if destination.is_dir() => destination.join(name),
        _ => destination.to_path_buf(),
    }
}

/// Whether both paths name the same existing file, after following links.
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy one file, then carry over its access and modification times.
///
/// `fs::copy` already copies the permission bits.
fn copy_file_with_metadata(source: &Path, destination: &Path) -> Result<()> {
    // fs::copy truncates the destination before reading the source.
    if is_same_file(source, destination) {
        return Err(Error::SameFile(destination.to_path_buf()));
    }

    let metadata = fs::metadata(source).at_path(source)?;
    fs::copy(source, destination).map_err(|e| {
        // fs::copy reports a missing destination parent as NotFound too.
        if e.kind() == io::ErrorKind::NotFound && source.exists() {
            Error::from_io(destination, e)
        } else {
            Error::from_io(source, e)
        }
    })?;

    let times = FileTimes::new()
        .set_accessed(metadata.accessed().at_path(source)?)
        .set_modified(metadata.modified().at_path(source)?);
    File::open(destination)
        .and_then(|f| f.set_times(times))
        .at_path(destination)?;

    Ok(())
}

/// Recursively copy a directory tree. Symlinks are followed.
///
/// When `destination` lies inside `source` the new copy is not copied
/// into itself again.
fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    fs::create_dir_all(destination).at_path(destination)?;
    copy_tree_contents(source, destination, destination)
}

fn copy_tree_contents(source: &Path, destination: &Path, root: &Path) -> Result<()> {
    let entries = fs::read_dir(source)
        .at_path(source)?
        .collect::<io::Result<Vec<_>>>()
        .at_path(source)?;

    for entry in entries {
        let from = entry.path();
        let to = destination.join(entry.file_name());

        if from.is_dir() {
            if is_same_file(&from, root) {
                tracing::debug!("Skipping {:?}, it is the copy being made", from);
                continue;
            }
            fs::create_dir_all(&to).at_path(&to)?;
            copy_tree_contents(&from, &to, root)?;
        } else {
            copy_file_with_metadata(&from, &to)?;
        }
    }

    let permissions = fs::metadata(source).at_path(source)?.permissions();
    fs::set_permissions(destination, permissions).at_path(destination)?;

    Ok(())
}

/// Cross-device half of a move: recreate `source` at `target`, then
/// delete `source`. Symlinks are moved as links.
fn copy_then_remove(source: &Path, target: &Path, metadata: &fs::Metadata) -> Result<()> {
    if metadata.is_symlink() {
        copy_symlink(source, target)?;
        fs::remove_file(source).at_path(source)
    } else if metadata.is_dir() {
        copy_tree(source, target)?;
        fs::remove_dir_all(source).at_path(source)
    } else {
        copy_file_with_metadata(source, target)?;
        fs::remove_file(source).at_path(source)
    }
}

#[cfg(unix)]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    let link = fs::read_link(source).at_path(source)?;
    std::os::unix::fs::symlink(link, target).at_path(target)
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    copy_file_with_metadata(source, target)
}

#[cfg(unix)]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(nix::errno::Errno::EXDEV as i32)
}

#[cfg(not(unix))]
fn is_cross_device(_err: &io::Error) -> bool {
    false
}
