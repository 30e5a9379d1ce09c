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

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::path::PathBuf;

use crate::ssh::tokio_client::AuthMethod;

/// A remote node that commands can be fanned out to.
#[derive(Debug)]
pub struct Node {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Option<SecretString>,
    pub key_file: Option<PathBuf>,
}

impl Node {
    pub fn new(host: String, port: u16, username: String) -> Self {
        Self {
            host,
            port,
            username,
            password: None,
            key_file: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::new(password.into().into_boxed_str()));
        self
    }

    pub fn with_key_file(mut self, key_file: impl Into<PathBuf>) -> Self {
        self.key_file = Some(key_file.into());
        self
    }

    pub fn parse(node_str: &str, default_user: Option<&str>) -> Result<Self> {
        // Parse formats:
        // - host
        // - host:port
        // - user@host
        // - user@host:port

        let (user_part, host_part) = match node_str.split_once('@') {
            Some((user, rest)) => (Some(user), rest),
            None => (None, node_str),
        };

        let (host, port) = match host_part.rsplit_once(':') {
            Some((host, port_str)) => {
                let port = port_str
                    .parse::<u16>()
                    .with_context(|| format!("Invalid port number in '{node_str}'"))?;
                (host, port)
            }
            None => (host_part, 22),
        };

        if host.is_empty() {
            anyhow::bail!("Missing host in node specification '{node_str}'");
        }

        let username = user_part
            .or(default_user)
            .map(|s| s.to_string())
            .unwrap_or_else(crate::config::get_current_username);

        Ok(Node::new(host.to_string(), port, username))
    }

    /// Key under which this node's session and results are recorded.
    pub fn address(&self) -> String {
        if self.port == 22 {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Authentication to use for this node, if any is configured.
    ///
    /// A key file wins over a password when both are configured; the
    /// password then serves as the key passphrase.
    pub fn auth_method(&self) -> Option<AuthMethod> {
        if let Some(key_file) = &self.key_file {
            let passphrase = self.password.as_ref().map(|p| p.expose_secret());
            return Some(AuthMethod::with_key_file(key_file, passphrase));
        }
        self.password
            .as_ref()
            .map(|password| AuthMethod::with_password(password.expose_secret()))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.username, self.host, self.port)
    }
}
