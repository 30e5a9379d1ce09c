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

//! Remote command executor.

use std::time::Duration;

use super::result_types::RemoteOutput;
use crate::error::Error;
use crate::ssh::Sessions;

/// Run `command` on the session for `address` and capture its output.
///
/// Failures are folded into the returned [`RemoteOutput`] instead of being
/// propagated. `timeout` of `None` waits for the command indefinitely.
pub async fn execute_on(
    sessions: &Sessions,
    address: &str,
    command: &str,
    timeout: Option<Duration>,
) -> RemoteOutput {
    let Some(client) = sessions.get(address) else {
        let reason = match sessions.failure(address) {
            Some(e) => e.to_string(),
            None => format!("No open session for {address}"),
        };
        return RemoteOutput::failed(reason);
    };

    tracing::debug!("Executing on {}: {}", address, command);

    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, client.execute(command)).await {
            Ok(result) => result,
            Err(_) => {
                return RemoteOutput::failed(
                    Error::RemoteExecutionFailed {
                        address: address.to_string(),
                        reason: format!("timed out after {} seconds", limit.as_secs()),
                    }
                    .to_string(),
                )
            }
        },
        None => client.execute(command).await,
    };

    match result {
        Ok(res) => {
            tracing::debug!("{} exited with status {}", address, res.exit_status);
            RemoteOutput::completed(res.stdout, res.stderr)
        }
        Err(e) => {
            tracing::warn!("Command failed on {}: {}", address, e);
            RemoteOutput::failed(
                Error::RemoteExecutionFailed {
                    address: address.to_string(),
                    reason: e.to_string(),
                }
                .to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute_on_unknown_address() {
        let sessions = Sessions::default();
        let output = execute_on(&sessions, "192.168.100.196", "ls /tmp", None).await;
        assert_eq!(output.output, None);
        assert!(output.error.contains("192.168.100.196"));
    }
}
