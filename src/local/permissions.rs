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

//! Permission changes.

use std::fs;
use std::path::Path;

use crate::error::{Error, IoResultExt, Result};

/// Highest mode accepted, including setuid, setgid and sticky bits.
const MAX_MODE: u32 = 0o7777;

/// Parse an octal permission string such as `"755"`, `"0644"` or `"0o600"`.
pub fn parse_mode(permissions: &str) -> Result<u32> {
    let trimmed = permissions.trim();
    let digits = trimmed.strip_prefix("0o").unwrap_or(trimmed);
    // from_str_radix would also take a leading '+'.
    if digits.is_empty() || !digits.bytes().all(|b| matches!(b, b'0'..=b'7')) {
        return Err(Error::InvalidPermissions(permissions.to_string()));
    }

    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= MAX_MODE => Ok(mode),
        _ => Err(Error::InvalidPermissions(permissions.to_string())),
    }
}

/// Apply the octal `permissions` to `path`.
pub fn set_permissions(path: &Path, permissions: &str) -> Result<String> {
    let mode = parse_mode(permissions)?;
    apply_mode(path, mode)?;
    tracing::info!("Set mode {:o} on {:?}", mode, path);
    Ok("Permissions updated".to_string())
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode)).at_path(path)
}

/// Only the owner write bit maps to anything outside Unix.
#[cfg(not(unix))]
fn apply_mode(path: &Path, mode: u32) -> Result<()> {
    let mut permissions = fs::metadata(path).at_path(path)?.permissions();
    permissions.set_readonly(mode & 0o200 == 0);
    fs::set_permissions(path, permissions).at_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("755").unwrap(), 0o755);
        assert_eq!(parse_mode("0644").unwrap(), 0o644);
        assert_eq!(parse_mode("0o600").unwrap(), 0o600);
        assert_eq!(parse_mode(" 700 ").unwrap(), 0o700);
        assert_eq!(parse_mode("4755").unwrap(), 0o4755);
    }

    #[test]
    fn test_parse_mode_rejects_invalid() {
        for bad in ["", "abc", "789", "-755", "+755", "0o+644", "17777", "rwxr-xr-x"] {
            assert!(
                matches!(parse_mode(bad), Err(Error::InvalidPermissions(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_set_permissions_exact_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("script.sh");
        fs::write(&path, "#!/bin/sh\n").unwrap();

        let message = set_permissions(&path, "755").unwrap();
        assert_eq!(message, "Permissions updated");
        assert_eq!(
            fs::metadata(&path).unwrap().permissions().mode() & 0o7777,
            0o755
        );

        set_permissions(&path, "600").unwrap();
        assert_eq!(
            fs::metadata(&path).unwrap().permissions().mode() & 0o7777,
            0o600
        );
    }

    #[test]
    fn test_set_permissions_missing_path() {
        let err = set_permissions(Path::new("/this/path/does/not/exist"), "644").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
