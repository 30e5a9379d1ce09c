pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod local;
pub mod node;
pub mod ssh;
pub mod utils;

pub use cli::Cli;
pub use commands::{dispatch, AppContext, CommandRegistry};
pub use config::Config;
pub use error::{Error, Result};
pub use executor::FanOutResult;
pub use node::Node;
