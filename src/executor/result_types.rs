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

//! Result types for remote execution and fan-out.

/// Captured result of one remote command.
///
/// `output` is `None` when the command could not be run at all; `error`
/// then carries the reason. Otherwise `error` holds the remote stderr,
/// which may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteOutput {
    pub output: Option<String>,
    pub error: String,
}

impl RemoteOutput {
    pub fn completed(stdout: String, stderr: String) -> Self {
        Self {
            output: Some(stdout),
            error: stderr,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            output: None,
            error: error.into(),
        }
    }

    /// True when the command ran; says nothing about its exit status.
    pub fn is_completed(&self) -> bool {
        self.output.is_some()
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Per-node outputs of a fan-out, keyed by node address.
///
/// Entries keep the order in which addresses first appeared; recording an
/// address again replaces its earlier output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutResult {
    entries: Vec<(String, RemoteOutput)>,
}

impl FanOutResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: String, output: RemoteOutput) {
        match self.entries.iter_mut().find(|(a, _)| *a == address) {
            Some((_, existing)) => *existing = output,
            None => self.entries.push((address, output)),
        }
    }

    pub fn get(&self, address: &str) -> Option<&RemoteOutput> {
        self.entries
            .iter()
            .find(|(a, _)| a == address)
            .map(|(_, output)| output)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RemoteOutput)> {
        self.entries.iter().map(|(a, o)| (a.as_str(), o))
    }

    /// Number of nodes where the command could not be run.
    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| !o.is_completed()).count()
    }
}
