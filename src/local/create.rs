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

//! File creation.

use std::fs;
use std::path::Path;

use crate::error::{IoResultExt, Result};

/// Write `content` to `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn create_file(path: &Path, content: &str) -> Result<String> {
    fs::write(path, content).at_path(path)?;
    tracing::info!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(format!("File '{}' created successfully", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_create_then_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("greeting.txt");

        let message = create_file(&path, "hello").unwrap();
        assert_eq!(
            message,
            format!("File '{}' created successfully", path.display())
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");

        create_file(&path, "world").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "world");
    }

    #[test]
    fn test_create_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty");
        create_file(&path, "").unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_create_in_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("file.txt");
        let err = create_file(&path, "x").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
