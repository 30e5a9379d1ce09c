pub mod known_hosts;
pub mod session;
pub mod tokio_client;

pub use known_hosts::StrictHostKeyChecking;
pub use session::{connect_all, ConnectPolicy, SessionOptions, Sessions};
pub use tokio_client::Client;
