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

//! Multi-node fan-out.

use std::time::Duration;

use super::remote::execute_on;
use super::result_types::FanOutResult;
use crate::node::Node;
use crate::ssh::Sessions;
use crate::utils::shell_quote;

/// Run the same command on every node, one node at a time.
///
/// Each address is targeted individually, in node order; a node whose
/// session could not be opened contributes its connection error.
pub async fn fan_out(
    sessions: &Sessions,
    nodes: &[Node],
    command: &str,
    timeout: Option<Duration>,
) -> FanOutResult {
    let mut results = FanOutResult::new();

    for node in nodes {
        let address = node.address();
        let output = execute_on(sessions, &address, command, timeout).await;
        results.insert(address, output);
    }

    results
}

/// Command used to list `directory` on a remote node.
pub fn list_command(directory: &str) -> String {
    format!("ls {}", shell_quote(directory))
}

/// List `directory` on every node.
pub async fn list_files_on_nodes(
    sessions: &Sessions,
    nodes: &[Node],
    directory: &str,
    timeout: Option<Duration>,
) -> FanOutResult {
    fan_out(sessions, nodes, &list_command(directory), timeout).await
}
