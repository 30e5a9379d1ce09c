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

//! Directory listings.

use chrono::{DateTime, Local};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{IoResultExt, Result};

/// Width the name column is padded to in detailed listings.
const NAME_COLUMN_WIDTH: usize = 30;

/// Newline-joined names of the entries of `directory`, in the order the
/// filesystem returns them.
pub fn list_files(directory: &Path) -> Result<String> {
    let mut names = Vec::new();
    for entry in fs::read_dir(directory).at_path(directory)? {
        let entry = entry.at_path(directory)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    tracing::debug!("Listed {} entries in {:?}", names.len(), directory);
    Ok(names.join("\n"))
}

/// Size and modification time of one subdirectory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryDetails {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Local>,
}

impl fmt::Display for DirectoryDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<width$} Size: {} bytes, Modified: {}",
            self.name,
            self.size,
            self.modified.format("%Y-%m-%d %H:%M:%S"),
            width = NAME_COLUMN_WIDTH
        )
    }
}

/// Subdirectories of `directory` whose name contains `filter`.
///
/// Plain files never match, whatever the filter. Symlinks to directories
/// count as directories.
pub fn filtered_subdirectories(directory: &Path, filter: &str) -> Result<Vec<DirectoryDetails>> {
    let mut details = Vec::new();

    for entry in fs::read_dir(directory).at_path(directory)? {
        let entry = entry.at_path(directory)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.contains(filter) {
            continue;
        }

        let path = entry.path();
        // A dangling symlink is neither a directory nor an error here.
        let Ok(metadata) = fs::metadata(&path) else {
            continue;
        };
        if !metadata.is_dir() {
            continue;
        }

        let modified = metadata.modified().at_path(&path)?;
        details.push(DirectoryDetails {
            name,
            size: metadata.len(),
            modified: DateTime::<Local>::from(modified),
        });
    }

    Ok(details)
}

/// Newline-joined detail lines for the subdirectories matching `filter`.
pub fn list_files_filter(directory: &Path, filter: &str) -> Result<String> {
    let lines: Vec<String> = filtered_subdirectories(directory, filter)?
        .iter()
        .map(ToString::to_string)
        .collect();
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();
        fs::create_dir(dir.path().join("backup_logs")).unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("logs.txt"), "not a directory").unwrap();
        dir
    }

    #[test]
    fn test_list_files_returns_every_entry() {
        let dir = fixture();
        let listing = list_files(dir.path()).unwrap();

        let mut names: Vec<&str> = listing.lines().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["backup_logs", "data", "logs", "logs.txt"]);
    }

    #[test]
    fn test_list_files_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(list_files(dir.path()).unwrap(), "");
    }

    #[test]
    fn test_list_files_missing_directory() {
        let err = list_files(Path::new("/this/directory/does/not/exist")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_filter_only_matches_directories() {
        let dir = fixture();
        let mut names: Vec<String> = filtered_subdirectories(dir.path(), "logs")
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        names.sort_unstable();
        assert_eq!(names, vec!["backup_logs", "logs"]);
    }

    #[test]
    fn test_empty_filter_returns_all_subdirectories() {
        let dir = fixture();
        let details = filtered_subdirectories(dir.path(), "").unwrap();
        assert_eq!(details.len(), 3);
        assert!(details.iter().all(|d| d.name != "logs.txt"));
    }

    #[test]
    fn test_filter_without_match() {
        let dir = fixture();
        assert_eq!(list_files_filter(dir.path(), "nothing-here").unwrap(), "");
    }

    #[test]
    fn test_detail_line_format() {
        let details = DirectoryDetails {
            name: "logs".to_string(),
            size: 4096,
            modified: Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap(),
        };
        assert_eq!(
            details.to_string(),
            format!(
                "{}{} Size: 4096 bytes, Modified: 2024-03-09 07:05:01",
                "logs",
                " ".repeat(26)
            )
        );
    }

    #[test]
    fn test_long_names_are_not_truncated() {
        let name = "a".repeat(40);
        let details = DirectoryDetails {
            name: name.clone(),
            size: 0,
            modified: Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        assert!(details.to_string().starts_with(&format!("{name} Size: 0 bytes")));
    }
}
