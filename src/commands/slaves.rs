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

//! `listFilesSlaves`: list a directory on every configured node.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::time::Duration;

use crate::config::Config;
use crate::executor::{list_files_on_nodes, FanOutResult};
use crate::ssh::{connect_all, SessionOptions};

/// Connect to every node of `config`, list `directory` on each and close
/// the sessions again.
///
/// Fails only when the configuration is unusable or, under the fail-fast
/// connect policy, when a node cannot be reached. Per-node failures are
/// otherwise part of the returned result.
pub async fn list_files_slaves(
    config: &Config,
    options: &SessionOptions,
    directory: &str,
) -> Result<FanOutResult> {
    let nodes = config.resolve_nodes()?;
    if nodes.is_empty() {
        anyhow::bail!(
            "No nodes configured. Add a 'nodes' list to the configuration file \
             (see profiles/default.yaml) or pass one with --config"
        );
    }

    tracing::info!("Listing {} on {} nodes", directory, nodes.len());

    let sessions = connect_all(&nodes, options)
        .await
        .context("Node session setup aborted")?;

    let command_timeout =
        (config.command_timeout > 0).then(|| Duration::from_secs(config.command_timeout));
    let results = list_files_on_nodes(&sessions, &nodes, directory, command_timeout).await;

    sessions.disconnect_all().await;

    Ok(results)
}

/// Render per-node output, and the error text of nodes that reported one.
pub fn format_fan_out(results: &FanOutResult, use_colors: bool) -> String {
    let mut lines = Vec::new();

    for (address, result) in results.iter() {
        let header = format!("Node {address} - Output:");
        lines.push(if use_colors {
            header.bold().to_string()
        } else {
            header
        });
        lines.push(
            result
                .output
                .as_deref()
                .unwrap_or_default()
                .trim_end()
                .to_string(),
        );

        if result.has_error() {
            let header = format!("Error on node {address}:");
            lines.push(if use_colors {
                header.red().to_string()
            } else {
                header
            });
            lines.push(result.error.trim_end().to_string());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::RemoteOutput;

    #[test]
    fn test_format_fan_out() {
        let mut results = FanOutResult::new();
        results.insert(
            "192.168.100.196".to_string(),
            RemoteOutput::completed("a\nb\n".to_string(), String::new()),
        );
        results.insert(
            "192.168.100.197".to_string(),
            RemoteOutput::failed("Failed to connect to 192.168.100.197: refused"),
        );

        assert_eq!(
            format_fan_out(&results, false),
            "Node 192.168.100.196 - Output:\na\nb\n\
             Node 192.168.100.197 - Output:\n\n\
             Error on node 192.168.100.197:\nFailed to connect to 192.168.100.197: refused"
        );
    }

    #[test]
    fn test_format_fan_out_with_remote_stderr() {
        let mut results = FanOutResult::new();
        results.insert(
            "node1".to_string(),
            RemoteOutput::completed(
                String::new(),
                "ls: cannot access '/nope': No such file or directory\n".to_string(),
            ),
        );

        let rendered = format_fan_out(&results, false);
        assert!(rendered.contains("Error on node node1:\nls: cannot access"));
    }

    #[tokio::test]
    async fn test_list_files_slaves_without_nodes() {
        let config = Config::default();
        let err = list_files_slaves(&config, &SessionOptions::default(), "/tmp")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No nodes configured"));
    }
}
