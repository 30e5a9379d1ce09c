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

//! Configuration loading, priority management and node resolution.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::types::{Config, NodeConfig};
use super::utils::{expand_env_vars, expand_tilde};
use crate::node::Node;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "nodefs.yaml";

impl Config {
    /// Load configuration from a file.
    ///
    /// A missing file yields the default (empty) configuration.
    pub async fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_tilde(path);

        if !expanded_path.exists() {
            tracing::debug!(
                "Config file not found at {:?}, using defaults",
                expanded_path
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&expanded_path)
            .await
            .with_context(|| format!("Failed to read configuration file at {}", expanded_path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse YAML configuration file at {}", expanded_path.display()))
    }

    /// Parse a configuration document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration with priority order:
    /// 1. Explicit --config path (must exist)
    /// 2. ./nodefs.yaml
    /// 3. $XDG_CONFIG_HOME/nodefs/config.yaml or the platform config dir
    /// 4. Empty configuration
    pub async fn load_with_priority(cli_config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_config_path {
            let expanded = expand_tilde(path);
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {:?}", expanded);
            }
            tracing::debug!("Using explicitly specified config file: {:?}", expanded);
            return Self::load(&expanded).await;
        }

        for candidate in Self::standard_locations() {
            if candidate.exists() {
                tracing::debug!("Found config at {:?}", candidate);
                return Self::load(&candidate).await;
            }
        }

        tracing::debug!("No config file found, using default empty configuration");
        Ok(Self::default())
    }

    /// Candidate configuration files in lookup order.
    pub fn standard_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];

        if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
            locations.push(
                PathBuf::from(xdg_config_home)
                    .join("nodefs")
                    .join("config.yaml"),
            );
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "nodefs") {
            locations.push(proj_dirs.config_dir().join("config.yaml"));
        }

        locations
    }

    /// known_hosts path from the configuration, tilde-expanded.
    pub fn known_hosts_path(&self) -> Option<PathBuf> {
        self.known_hosts
            .as_deref()
            .map(|p| expand_tilde(Path::new(p)))
    }

    /// Resolve the configured node entries into connection targets.
    ///
    /// Node values fall back to `defaults`. Passwords may reference
    /// environment variables.
    pub fn resolve_nodes(&self) -> Result<Vec<Node>> {
        let defaults = &self.defaults;

        self.nodes
            .iter()
            .map(|node_config| {
                let (mut node, password, ssh_key) = match node_config {
                    NodeConfig::Simple(spec) => {
                        let mut node = Node::parse(spec, defaults.user.as_deref())?;
                        if !spec.contains(':') {
                            node.port = defaults.port.unwrap_or(22);
                        }
                        (node, None, None)
                    }
                    NodeConfig::Detailed {
                        host,
                        port,
                        user,
                        password,
                        ssh_key,
                    } => {
                        let username = user
                            .clone()
                            .or_else(|| defaults.user.clone())
                            .unwrap_or_else(super::utils::get_current_username);
                        let port = port.or(defaults.port).unwrap_or(22);
                        (
                            Node::new(host.clone(), port, username),
                            password.as_deref(),
                            ssh_key.as_deref(),
                        )
                    }
                };

                if let Some(password) = password.or(defaults.password.as_deref()) {
                    node = node.with_password(expand_env_vars(password));
                }
                if let Some(ssh_key) = ssh_key.or(defaults.ssh_key.as_deref()) {
                    node = node.with_key_file(expand_tilde(Path::new(&expand_env_vars(ssh_key))));
                }

                Ok(node)
            })
            .collect::<Result<Vec<_>>>()
            .context("Invalid node entry in configuration")
    }
}
