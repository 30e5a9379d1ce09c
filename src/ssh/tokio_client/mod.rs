//! This module is a trimmed, internalized SSH client modelled on
//! async-ssh2-tokio and powered by russh.
//!
//! The heart of this module is [`Client`]. Use this for connection,
//! authentication and command execution.

pub mod authentication;
pub mod channel_manager;
pub mod connection;
pub mod error;

pub use authentication::{AuthMethod, ServerCheckMethod};
pub use channel_manager::CommandExecutedResult;
pub use connection::{Client, ClientHandler};
pub use error::Error;

pub use russh::client::Config;
