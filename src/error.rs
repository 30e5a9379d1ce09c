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

//! Error types surfaced by nodefs operations.
//!
//! Local filesystem failures are classified from `io::ErrorKind`; remote
//! failures carry the address of the node they happened on.

use std::io;
use std::path::{Path, PathBuf};

use crate::ssh::tokio_client;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("File exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Source and destination are the same file: {}", .0.display())]
    SameFile(PathBuf),

    #[error("Invalid permissions '{0}': expected an octal mode such as 755")]
    InvalidPermissions(String),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Authentication failed for {address}: {source}")]
    AuthenticationFailed {
        address: String,
        #[source]
        source: tokio_client::Error,
    },

    #[error("Host key verification failed for {address}: {source}")]
    HostKeyRejected {
        address: String,
        #[source]
        source: tokio_client::Error,
    },

    #[error("No password or key file configured for {0}")]
    MissingCredentials(String),

    #[error("Failed to connect to {address}: {reason}")]
    ConnectionFailed { address: String, reason: String },

    #[error("Remote command failed on {address}: {reason}")]
    RemoteExecutionFailed { address: String, reason: String },
}

impl Error {
    /// Classify an I/O error raised while operating on `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path),
            io::ErrorKind::PermissionDenied => Error::PermissionDenied(path),
            io::ErrorKind::AlreadyExists => Error::AlreadyExists(path),
            _ => Error::Io { path, source: err },
        }
    }

    /// Classify an SSH error raised while connecting to `address`.
    pub fn from_ssh(address: &str, err: tokio_client::Error) -> Self {
        let address = address.to_string();
        if err.is_auth_failure() {
            Error::AuthenticationFailed {
                address,
                source: err,
            }
        } else if err.is_host_key_failure() {
            Error::HostKeyRejected {
                address,
                source: err,
            }
        } else {
            Error::ConnectionFailed {
                address,
                reason: err.to_string(),
            }
        }
    }
}

/// Extension to attach the offending path to `io::Result`s.
pub(crate) trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| Error::from_io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classification() {
        let path = Path::new("/data/missing");
        assert!(matches!(
            Error::from_io(path, io::Error::from(io::ErrorKind::NotFound)),
            Error::NotFound(p) if p == path
        ));
        assert!(matches!(
            Error::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied)),
            Error::PermissionDenied(_)
        ));
        assert!(matches!(
            Error::from_io(path, io::Error::from(io::ErrorKind::AlreadyExists)),
            Error::AlreadyExists(_)
        ));
        assert!(matches!(
            Error::from_io(path, io::Error::from(io::ErrorKind::InvalidData)),
            Error::Io { .. }
        ));
    }

    #[test]
    fn test_from_ssh_classification() {
        assert!(matches!(
            Error::from_ssh("node1", tokio_client::Error::PasswordWrong),
            Error::AuthenticationFailed { .. }
        ));
        assert!(matches!(
            Error::from_ssh("node1", tokio_client::Error::ServerCheckFailed),
            Error::HostKeyRejected { .. }
        ));
        assert!(matches!(
            Error::from_ssh("node1", tokio_client::Error::CommandDidntExit),
            Error::ConnectionFailed { .. }
        ));
    }

    #[test]
    fn test_display_names_the_path() {
        let err = Error::NotFound(PathBuf::from("/data/missing"));
        assert_eq!(err.to_string(), "No such file or directory: /data/missing");
    }
}
