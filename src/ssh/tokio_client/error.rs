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

//! Error type for the low-level SSH client.

use std::io;

/// Errors raised while connecting to, authenticating with, or running
/// commands on a remote node.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Keyfile auth failed")]
    KeyAuthFailed,
    #[error("Unable to load key, bad format or passphrase: {0}")]
    KeyInvalid(russh::keys::Error),
    #[error("Wrong password")]
    PasswordWrong,
    #[error("Invalid address was provided: {0}")]
    AddressInvalid(io::Error),
    #[error("The executed command didn't send an exit code")]
    CommandDidntExit,
    #[error("Server check failed")]
    ServerCheckFailed,
    #[error("Host key for {host} does not match known_hosts entry on line {line}")]
    HostKeyChanged { host: String, line: usize },
    #[error("Ssh error occured: {0}")]
    SshError(#[from] russh::Error),
}

impl Error {
    /// True when the server rejected the supplied credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::PasswordWrong | Error::KeyAuthFailed)
    }

    /// True when the server identity could not be verified.
    pub fn is_host_key_failure(&self) -> bool {
        matches!(
            self,
            Error::ServerCheckFailed | Error::HostKeyChanged { .. }
        )
    }
}
