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

//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ssh::known_hosts::StrictHostKeyChecking;
use crate::ssh::session::ConnectPolicy;

/// Main configuration structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    /// Remote nodes targeted by fan-out commands, in fan-out order.
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,

    #[serde(default)]
    pub host_key_checking: StrictHostKeyChecking,

    /// known_hosts file used for host key checks. Defaults to ~/.ssh/known_hosts.
    #[serde(default)]
    pub known_hosts: Option<String>,

    #[serde(default)]
    pub connect_policy: ConnectPolicy,

    /// Connection setup timeout in seconds. 0 disables the timeout.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Remote command timeout in seconds. 0 disables the timeout.
    #[serde(default)]
    pub command_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            nodes: Vec::new(),
            host_key_checking: StrictHostKeyChecking::default(),
            known_hosts: None,
            connect_policy: ConnectPolicy::default(),
            connect_timeout: default_connect_timeout(),
            command_timeout: 0,
        }
    }
}

/// Settings inherited by every node that does not override them.
#[derive(Serialize, Deserialize, Default, Clone)]
pub struct Defaults {
    pub user: Option<String>,
    pub port: Option<u16>,
    pub password: Option<String>,
    pub ssh_key: Option<String>,
}

/// Node configuration.
#[derive(Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum NodeConfig {
    /// `[user@]host[:port]`
    Simple(String),
    Detailed {
        host: String,
        #[serde(default)]
        port: Option<u16>,
        #[serde(default)]
        user: Option<String>,
        #[serde(default)]
        password: Option<String>,
        #[serde(default)]
        ssh_key: Option<String>,
    },
}

impl NodeConfig {
    /// Host part of the node entry, without user or port.
    pub fn host(&self) -> &str {
        match self {
            NodeConfig::Simple(s) => {
                let rest = s.split_once('@').map_or(s.as_str(), |(_, rest)| rest);
                rest.rsplit_once(':').map_or(rest, |(host, _)| host)
            }
            NodeConfig::Detailed { host, .. } => host,
        }
    }
}

fn redact(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "********")
}

impl fmt::Debug for Defaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defaults")
            .field("user", &self.user)
            .field("port", &self.port)
            .field("password", &redact(&self.password))
            .field("ssh_key", &self.ssh_key)
            .finish()
    }
}

impl fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeConfig::Simple(s) => f.debug_tuple("Simple").field(s).finish(),
            NodeConfig::Detailed {
                host,
                port,
                user,
                password,
                ssh_key,
            } => f
                .debug_struct("Detailed")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("password", &redact(password))
                .field("ssh_key", ssh_key)
                .finish(),
        }
    }
}

pub(super) fn default_connect_timeout() -> u64 {
    30
}
