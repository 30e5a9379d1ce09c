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

use clap::Parser;
use std::path::PathBuf;

use crate::ssh::known_hosts::StrictHostKeyChecking;

#[derive(Parser, Debug)]
#[command(
    name = "nodefs",
    version,
    about = "Master/slave file operations - local filesystem commands with SSH fan-out",
    long_about = "nodefs runs filesystem operations (list, filter, copy, move, chmod, create) on the local\nmaster node and can fan a directory listing out to every configured slave node over SSH.\nRun without a command to see the available commands.",
    after_help = "EXAMPLES:\n  List a directory:              nodefs listFiles /var/log\n  Subdirectories matching a name: nodefs listFilesFilter /srv data\n  Copy a tree:                   nodefs copyFileOrDirectory ./a ./b\n  Set permissions:               nodefs setPermissions ./run.sh 755\n  List a directory on all nodes: nodefs --config profiles/default.yaml listFilesSlaves /home"
)]
pub struct Cli {
    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[arg(
        long,
        help = "Configuration file path\nConfig loading priority:\n  1. This flag's value\n  2. Current directory (./nodefs.yaml)\n  3. User config (~/.config/nodefs/config.yaml)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "strict-host-key-checking",
        value_name = "MODE",
        help = "Host key checking mode (yes/no/accept-new), overrides the configuration file"
    )]
    pub strict_host_key_checking: Option<StrictHostKeyChecking>,

    #[arg(
        long,
        help = "Abort slave operations when any node fails to connect\nBy default unreachable nodes are reported individually"
    )]
    pub fail_fast: bool,

    #[arg(help = "Command to run (omit to list the available commands)")]
    pub command: Option<String>,

    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Positional arguments for the command"
    )]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["nodefs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.args.is_empty());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.fail_fast);
    }

    #[test]
    fn test_command_with_arguments() {
        let cli = Cli::try_parse_from(["nodefs", "createFile", "/tmp/x", "hello world"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("createFile"));
        assert_eq!(cli.args, vec!["/tmp/x", "hello world"]);
    }

    #[test]
    fn test_unknown_command_is_accepted_by_parser() {
        let cli = Cli::try_parse_from(["nodefs", "executeA"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("executeA"));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "nodefs",
            "-vv",
            "--config",
            "profiles/default.yaml",
            "--strict-host-key-checking",
            "no",
            "--fail-fast",
            "listFilesSlaves",
            "/home",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("profiles/default.yaml")));
        assert_eq!(
            cli.strict_host_key_checking,
            Some(StrictHostKeyChecking::No)
        );
        assert!(cli.fail_fast);
        assert_eq!(cli.args, vec!["/home"]);
    }

    #[test]
    fn test_hyphen_values_pass_through() {
        let cli = Cli::try_parse_from(["nodefs", "createFile", "/tmp/x", "-n"]).unwrap();
        assert_eq!(cli.args, vec!["/tmp/x", "-n"]);
    }

    #[test]
    fn test_invalid_host_key_mode() {
        assert!(Cli::try_parse_from(["nodefs", "--strict-host-key-checking", "maybe"]).is_err());
    }
}
