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

//! Remote session manager.
//!
//! Opens one authenticated SSH session per configured node and keeps them
//! in a mapping keyed by node address for the lifetime of one fan-out.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::known_hosts::{get_check_method, StrictHostKeyChecking};
use super::tokio_client::Client;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::node::Node;

/// How to react when a node cannot be connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectPolicy {
    /// Record the failure for that node and keep connecting the others.
    #[default]
    Isolated,
    /// Abort the whole setup on the first failure.
    FailFast,
}

/// Options for establishing sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub strict_mode: StrictHostKeyChecking,
    pub known_hosts: Option<PathBuf>,
    pub policy: ConnectPolicy,
    /// `None` waits indefinitely.
    pub connect_timeout: Option<Duration>,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            strict_mode: config.host_key_checking,
            known_hosts: config.known_hosts_path(),
            policy: config.connect_policy,
            connect_timeout: (config.connect_timeout > 0)
                .then(|| Duration::from_secs(config.connect_timeout)),
        }
    }

    pub fn with_strict_mode(mut self, strict_mode: StrictHostKeyChecking) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    pub fn with_policy(mut self, policy: ConnectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Open sessions keyed by node address.
///
/// Under [`ConnectPolicy::Isolated`] nodes that could not be reached are kept
/// in a separate failure map so callers can report them per node.
#[derive(Debug, Default)]
pub struct Sessions {
    sessions: HashMap<String, Client>,
    failures: HashMap<String, Error>,
}

impl Sessions {
    pub fn get(&self, address: &str) -> Option<&Client> {
        self.sessions.get(address)
    }

    pub fn failure(&self, address: &str) -> Option<&Error> {
        self.failures.get(address)
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub(crate) fn insert(&mut self, address: String, client: Client) {
        self.failures.remove(&address);
        self.sessions.insert(address, client);
    }

    pub(crate) fn insert_failure(&mut self, address: String, error: Error) {
        self.sessions.remove(&address);
        self.failures.insert(address, error);
    }

    /// Close every open session. Errors are logged, not returned.
    pub async fn disconnect_all(&self) {
        for (address, client) in &self.sessions {
            if let Err(e) = client.disconnect().await {
                tracing::debug!("Failed to disconnect from {}: {}", address, e);
            }
        }
    }
}

/// Connect to every node in order.
///
/// Later nodes sharing an address replace earlier ones in the mapping.
pub async fn connect_all(nodes: &[Node], options: &SessionOptions) -> Result<Sessions> {
    let mut sessions = Sessions::default();

    for node in nodes {
        let address = node.address();
        match connect_node(node, options).await {
            Ok(client) => {
                tracing::info!("Connected to {}", node);
                sessions.insert(address, client);
            }
            Err(e) => match options.policy {
                ConnectPolicy::FailFast => {
                    tracing::error!("Connection to {} failed, aborting: {}", node, e);
                    sessions.disconnect_all().await;
                    return Err(e);
                }
                ConnectPolicy::Isolated => {
                    tracing::warn!("Connection to {} failed: {}", node, e);
                    sessions.insert_failure(address, e);
                }
            },
        }
    }

    Ok(sessions)
}

/// Open and authenticate a single session.
pub async fn connect_node(node: &Node, options: &SessionOptions) -> Result<Client> {
    let address = node.address();
    let auth = node
        .auth_method()
        .ok_or_else(|| Error::MissingCredentials(address.clone()))?;
    let check_method = get_check_method(options.strict_mode, options.known_hosts.as_deref());

    tracing::debug!("Connecting to {} ({:?})", node, check_method);
    let connect = Client::connect((node.host.as_str(), node.port), &node.username, auth, check_method);

    let result = match options.connect_timeout {
        Some(timeout) => match tokio::time::timeout(timeout, connect).await {
            Ok(result) => result,
            Err(_) => {
                return Err(Error::ConnectionFailed {
                    address,
                    reason: format!("timed out after {} seconds", timeout.as_secs()),
                })
            }
        },
        None => connect.await,
    };

    result.map_err(|e| Error::from_ssh(&address, e))
}
