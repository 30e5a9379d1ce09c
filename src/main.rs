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

use anyhow::Result;
use clap::Parser;

use nodefs::{
    cli::Cli,
    commands::{dispatch, AppContext, CommandRegistry},
    utils::{init_logging, should_use_colors},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let ctx = AppContext {
        config_path: cli.config,
        strict_mode: cli.strict_host_key_checking,
        fail_fast: cli.fail_fast,
        use_colors: should_use_colors(),
    };

    let registry = CommandRegistry::new();
    let output = dispatch(&registry, cli.command.as_deref(), &cli.args, &ctx).await?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
