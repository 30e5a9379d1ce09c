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

//! Routes a command name and its positional arguments to the operation.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::registry::{CommandKind, CommandRegistry};
use super::slaves::{format_fan_out, list_files_slaves};
use crate::config::Config;
use crate::local;
use crate::ssh::{ConnectPolicy, SessionOptions, StrictHostKeyChecking};

/// Settings shared by every command of one invocation.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub config_path: Option<PathBuf>,
    pub strict_mode: Option<StrictHostKeyChecking>,
    pub fail_fast: bool,
    pub use_colors: bool,
}

impl AppContext {
    /// Session options from `config`, with command-line overrides applied.
    pub fn session_options(&self, config: &Config) -> SessionOptions {
        let mut options = SessionOptions::from_config(config);
        if let Some(strict_mode) = self.strict_mode {
            options = options.with_strict_mode(strict_mode);
        }
        if self.fail_fast {
            options = options.with_policy(ConnectPolicy::FailFast);
        }
        options
    }
}

/// Listing printed when no command is given.
pub fn available_commands(registry: &CommandRegistry) -> String {
    let mut lines = vec!["Available commands:".to_string()];
    for spec in registry.iter() {
        lines.push(format!("  {:<44} {}", spec.usage, spec.about));
    }
    lines.join("\n")
}

/// Run `command` with `args` and return the text to print.
///
/// Operation failures become an `Error: ...` line. Only configuration
/// problems and fail-fast connection failures are returned as `Err`.
pub async fn dispatch(
    registry: &CommandRegistry,
    command: Option<&str>,
    args: &[String],
    ctx: &AppContext,
) -> Result<String> {
    let Some(name) = command else {
        return Ok(available_commands(registry));
    };

    let Some(spec) = registry.lookup(name) else {
        tracing::debug!("Unknown command {:?}", name);
        return Ok(format!("Command '{name}' not recognized."));
    };

    if args.len() < spec.required_args {
        return Ok(format!("{}\nUsage: {}", spec.missing_args, spec.usage));
    }

    tracing::debug!("Running {} with {} arguments", spec.name, args.len());

    let output = match spec.kind {
        CommandKind::ListFiles => render(local::list_files(Path::new(&args[0]))),
        CommandKind::ListFilesFilter => {
            let filter = args.get(1).map(String::as_str).unwrap_or("");
            render(local::list_files_filter(Path::new(&args[0]), filter))
        }
        CommandKind::CopyFileOrDirectory => render(local::copy_file_or_directory(
            Path::new(&args[0]),
            Path::new(&args[1]),
        )),
        CommandKind::MoveFileOrDirectory => render(local::move_file_or_directory(
            Path::new(&args[0]),
            Path::new(&args[1]),
        )),
        CommandKind::SetPermissions => {
            render(local::set_permissions(Path::new(&args[0]), &args[1]))
        }
        CommandKind::CreateFile => render(local::create_file(Path::new(&args[0]), &args[1])),
        CommandKind::ListFilesSlaves => {
            let config = Config::load_with_priority(ctx.config_path.as_deref()).await?;
            let options = ctx.session_options(&config);
            let results = list_files_slaves(&config, &options, &args[0]).await?;
            format_fan_out(&results, ctx.use_colors)
        }
    };

    Ok(output)
}

fn render(result: crate::error::Result<String>) -> String {
    match result {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("Operation failed: {:?}", e);
            format!("Error: {e}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_no_command_lists_every_command() {
        let registry = CommandRegistry::new();
        let output = dispatch(&registry, None, &[], &AppContext::default())
            .await
            .unwrap();

        assert!(output.starts_with("Available commands:"));
        for spec in registry.iter() {
            assert!(output.contains(spec.usage), "missing {}", spec.name);
        }
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let output = dispatch(
            &CommandRegistry::new(),
            Some("executeA"),
            &[],
            &AppContext::default(),
        )
        .await
        .unwrap();
        assert_eq!(output, "Command 'executeA' not recognized.");
    }

    #[tokio::test]
    async fn test_missing_arguments() {
        let output = dispatch(
            &CommandRegistry::new(),
            Some("copyFileOrDirectory"),
            &args(&["only-source"]),
            &AppContext::default(),
        )
        .await
        .unwrap();
        assert!(output.starts_with("Paths not specified."));
    }

    #[tokio::test]
    async fn test_operation_error_is_rendered() {
        let output = dispatch(
            &CommandRegistry::new(),
            Some("listFiles"),
            &args(&["/this/directory/does/not/exist"]),
            &AppContext::default(),
        )
        .await
        .unwrap();
        assert!(output.starts_with("Error: No such file or directory"));
    }

    #[tokio::test]
    async fn test_create_file_and_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("hello.txt");
        let registry = CommandRegistry::new();
        let ctx = AppContext::default();

        let output = dispatch(
            &registry,
            Some("createFile"),
            &args(&[path.to_str().unwrap(), "hello"]),
            &ctx,
        )
        .await
        .unwrap();
        assert!(output.ends_with("created successfully"));

        let listing = dispatch(
            &registry,
            Some("listFiles"),
            &args(&[dir.path().to_str().unwrap()]),
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(listing, "hello.txt");
    }

    #[test]
    fn test_session_options_overrides() {
        let config = Config::default();
        let ctx = AppContext {
            strict_mode: Some(StrictHostKeyChecking::No),
            fail_fast: true,
            ..AppContext::default()
        };
        let options = ctx.session_options(&config);
        assert_eq!(options.strict_mode, StrictHostKeyChecking::No);
        assert_eq!(options.policy, ConnectPolicy::FailFast);

        let options = AppContext::default().session_options(&config);
        assert_eq!(options.strict_mode, StrictHostKeyChecking::AcceptNew);
        assert_eq!(options.policy, ConnectPolicy::Isolated);
    }
}
