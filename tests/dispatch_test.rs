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

//! Command dispatch through the registry, as the binary drives it.

use std::fs;
use tempfile::TempDir;

use nodefs::commands::{available_commands, dispatch, AppContext, CommandRegistry};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_no_arguments_prints_command_list() {
    let registry = CommandRegistry::new();
    let output = dispatch(&registry, None, &[], &AppContext::default())
        .await
        .unwrap();

    assert_eq!(output, available_commands(&registry));
    for name in [
        "listFiles",
        "listFilesFilter",
        "copyFileOrDirectory",
        "moveFileOrDirectory",
        "setPermissions",
        "listFilesSlaves",
        "createFile",
    ] {
        assert!(output.contains(name), "{name} missing from command list");
    }
}

#[tokio::test]
async fn test_unknown_command_is_reported() {
    let output = dispatch(
        &CommandRegistry::new(),
        Some("formatDisk"),
        &args(&["/"]),
        &AppContext::default(),
    )
    .await
    .unwrap();
    assert_eq!(output, "Command 'formatDisk' not recognized.");
}

#[tokio::test]
async fn test_missing_arguments_print_usage_hint() {
    let registry = CommandRegistry::new();
    let ctx = AppContext::default();

    let cases = [
        ("listFiles", "Directory not specified."),
        ("listFilesFilter", "Directory not specified."),
        ("moveFileOrDirectory", "Paths not specified."),
        ("setPermissions", "Path or permissions not specified."),
        ("listFilesSlaves", "Directory not specified."),
        ("createFile", "File path not specified."),
    ];
    for (command, hint) in cases {
        let output = dispatch(&registry, Some(command), &[], &ctx).await.unwrap();
        assert!(output.starts_with(hint), "{command}: {output}");
    }
}

#[tokio::test]
async fn test_copy_error_is_printed_not_returned() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("missing.txt");
    let destination = dir.path().join("out.txt");

    let output = dispatch(
        &CommandRegistry::new(),
        Some("copyFileOrDirectory"),
        &args(&[source.to_str().unwrap(), destination.to_str().unwrap()]),
        &AppContext::default(),
    )
    .await
    .unwrap();
    assert!(output.starts_with("Error: "), "{output}");
    assert!(!destination.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_set_permissions_command() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("script.sh");
    fs::write(&path, "echo hi\n").unwrap();

    let output = dispatch(
        &CommandRegistry::new(),
        Some("setPermissions"),
        &args(&[path.to_str().unwrap(), "0700"]),
        &AppContext::default(),
    )
    .await
    .unwrap();
    assert_eq!(output, "Permissions updated");
    assert_eq!(
        fs::metadata(&path).unwrap().permissions().mode() & 0o777,
        0o700
    );
}

#[tokio::test]
async fn test_slaves_with_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let ctx = AppContext {
        config_path: Some(dir.path().join("absent.yaml")),
        ..AppContext::default()
    };

    let result = dispatch(
        &CommandRegistry::new(),
        Some("listFilesSlaves"),
        &args(&["/home"]),
        &ctx,
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_slaves_without_nodes_fails() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("empty.yaml");
    fs::write(&config_path, "connect_timeout: 5\n").unwrap();
    let ctx = AppContext {
        config_path: Some(config_path),
        ..AppContext::default()
    };

    let err = dispatch(
        &CommandRegistry::new(),
        Some("listFilesSlaves"),
        &args(&["/home"]),
        &ctx,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("No nodes configured"));
}
