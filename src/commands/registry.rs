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

//! Table of the commands nodefs understands.

/// Operation behind a command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    ListFiles,
    ListFilesFilter,
    CopyFileOrDirectory,
    MoveFileOrDirectory,
    SetPermissions,
    ListFilesSlaves,
    CreateFile,
}

/// One entry of the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub about: &'static str,
    pub kind: CommandKind,
    /// Positional arguments that must be present.
    pub required_args: usize,
    /// Printed when fewer than `required_args` are given.
    pub missing_args: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "listFiles",
        usage: "listFiles <directory>",
        about: "List the entries of a local directory",
        kind: CommandKind::ListFiles,
        required_args: 1,
        missing_args: "Directory not specified.",
    },
    CommandSpec {
        name: "listFilesFilter",
        usage: "listFilesFilter <directory> [filter]",
        about: "Show details of local subdirectories whose name contains the filter",
        kind: CommandKind::ListFilesFilter,
        required_args: 1,
        missing_args: "Directory not specified.",
    },
    CommandSpec {
        name: "copyFileOrDirectory",
        usage: "copyFileOrDirectory <source> <destination>",
        about: "Copy a file or a directory tree",
        kind: CommandKind::CopyFileOrDirectory,
        required_args: 2,
        missing_args: "Paths not specified.",
    },
    CommandSpec {
        name: "moveFileOrDirectory",
        usage: "moveFileOrDirectory <source> <destination>",
        about: "Move a file or a directory",
        kind: CommandKind::MoveFileOrDirectory,
        required_args: 2,
        missing_args: "Paths not specified.",
    },
    CommandSpec {
        name: "setPermissions",
        usage: "setPermissions <path> <permissions>",
        about: "Set the octal permission bits of a path",
        kind: CommandKind::SetPermissions,
        required_args: 2,
        missing_args: "Path or permissions not specified.",
    },
    CommandSpec {
        name: "listFilesSlaves",
        usage: "listFilesSlaves <directory>",
        about: "List a directory on every configured node",
        kind: CommandKind::ListFilesSlaves,
        required_args: 1,
        missing_args: "Directory not specified.",
    },
    CommandSpec {
        name: "createFile",
        usage: "createFile <path> <content>",
        about: "Write text content to a local file",
        kind: CommandKind::CreateFile,
        required_args: 2,
        missing_args: "File path not specified.",
    },
];

/// Name-to-command lookup over the static command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandRegistry {
    commands: &'static [CommandSpec],
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self { commands: COMMANDS }
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command registered under `name`. Names are case-sensitive.
    pub fn lookup(&self, name: &str) -> Option<&'static CommandSpec> {
        self.commands.iter().find(|spec| spec.name == name)
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static CommandSpec> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
