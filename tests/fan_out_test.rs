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

//! Fan-out against nodes that refuse connections.
//!
//! Nothing listens on port 1 of the loopback interface, so every connection
//! attempt fails quickly without touching the network.

use std::time::Duration;

use nodefs::commands::slaves::{format_fan_out, list_files_slaves};
use nodefs::executor::{execute_on, list_command};
use nodefs::ssh::{connect_all, ConnectPolicy, SessionOptions, Sessions, StrictHostKeyChecking};
use nodefs::Config;

const UNREACHABLE_CONFIG: &str = r#"
host_key_checking: "no"
connect_timeout: 5
defaults:
  password: secret
nodes:
  - host: 127.0.0.1
    port: 1
    user: cluster-1
  - operator@127.0.0.1:1
  - host: localhost
    port: 1
    user: cluster-2
"#;

#[tokio::test]
async fn test_isolated_policy_reports_each_unreachable_node() {
    let config = Config::from_yaml(UNREACHABLE_CONFIG).unwrap();
    let options = SessionOptions::from_config(&config);
    assert_eq!(options.policy, ConnectPolicy::Isolated);

    let results = list_files_slaves(&config, &options, "/home").await.unwrap();

    // The first two entries share an address and collapse into one.
    assert_eq!(results.len(), 2);
    for (address, output) in results.iter() {
        assert!(output.output.is_none(), "{address} produced output");
        assert!(!output.error.is_empty(), "{address} has no error text");
    }
    assert_eq!(results.failed_count(), 2);

    let rendered = format_fan_out(&results, false);
    assert!(rendered.contains("Node 127.0.0.1:1 - Output:"));
    assert!(rendered.contains("Error on node localhost:1:"));
}

#[tokio::test]
async fn test_fail_fast_policy_aborts_setup() {
    let config = Config::from_yaml(UNREACHABLE_CONFIG).unwrap();
    let options = SessionOptions::from_config(&config).with_policy(ConnectPolicy::FailFast);

    let nodes = config.resolve_nodes().unwrap();
    assert!(connect_all(&nodes, &options).await.is_err());
    assert!(list_files_slaves(&config, &options, "/home").await.is_err());
}

#[tokio::test]
async fn test_connect_timeout_is_applied() {
    let config = Config::from_yaml(UNREACHABLE_CONFIG).unwrap();
    let options = SessionOptions::from_config(&config)
        .with_strict_mode(StrictHostKeyChecking::No)
        .with_connect_timeout(Some(Duration::from_secs(1)));

    let nodes = config.resolve_nodes().unwrap();
    let started = std::time::Instant::now();
    let sessions = connect_all(&nodes, &options).await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(sessions.is_empty());
    assert_eq!(sessions.failure_count(), 2);
}

#[tokio::test]
async fn test_executor_without_session() {
    let sessions = Sessions::default();
    let output = execute_on(&sessions, "10.0.0.1", &list_command("/tmp"), None).await;
    assert!(output.output.is_none());
    assert!(output.error.contains("10.0.0.1"));
}
