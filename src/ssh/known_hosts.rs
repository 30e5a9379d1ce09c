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

use super::tokio_client::ServerCheckMethod;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Get the default known_hosts file path
pub fn get_default_known_hosts_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".ssh").join("known_hosts"))
}

/// Create a ServerCheckMethod based on strict host key checking mode.
///
/// `known_hosts` overrides the default `~/.ssh/known_hosts` location.
pub fn get_check_method(
    strict_mode: StrictHostKeyChecking,
    known_hosts: Option<&Path>,
) -> ServerCheckMethod {
    if strict_mode == StrictHostKeyChecking::No {
        tracing::debug!("Host key checking disabled (strict mode = no)");
        return ServerCheckMethod::NoCheck;
    }

    let Some(known_hosts_path) = known_hosts
        .map(Path::to_path_buf)
        .or_else(get_default_known_hosts_path)
    else {
        tracing::warn!("Could not determine known_hosts path, using NoCheck");
        eprintln!("WARNING: Could not determine known_hosts path. Host key verification disabled.");
        return ServerCheckMethod::NoCheck;
    };

    match strict_mode {
        StrictHostKeyChecking::Yes => {
            tracing::debug!(
                "Using known_hosts file: {:?} (strict mode)",
                known_hosts_path
            );
            ServerCheckMethod::KnownHostsFile(known_hosts_path)
        }
        StrictHostKeyChecking::AcceptNew => {
            tracing::debug!(
                "Using known_hosts file: {:?} (accept-new mode)",
                known_hosts_path
            );
            ServerCheckMethod::TrustOnFirstUse(known_hosts_path)
        }
        StrictHostKeyChecking::No => ServerCheckMethod::NoCheck,
    }
}

/// Mode for host key checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrictHostKeyChecking {
    /// Always verify host keys (fail on unknown/changed)
    #[serde(alias = "strict", alias = "true")]
    Yes,
    /// Never verify host keys (accept all)
    #[serde(alias = "disabled", alias = "false")]
    No,
    /// Verify known hosts, add new ones automatically (TOFU)
    #[default]
    #[serde(alias = "tofu")]
    AcceptNew,
}

impl StrictHostKeyChecking {
    pub fn to_bool(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl FromStr for StrictHostKeyChecking {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" | "true" | "strict" => Ok(Self::Yes),
            "no" | "false" | "disabled" => Ok(Self::No),
            "accept-new" | "tofu" => Ok(Self::AcceptNew),
            other => Err(format!(
                "invalid host key checking mode '{other}' (expected yes, no or accept-new)"
            )),
        }
    }
}

impl fmt::Display for StrictHostKeyChecking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "yes"),
            Self::No => write!(f, "no"),
            Self::AcceptNew => write!(f, "accept-new"),
        }
    }
}
