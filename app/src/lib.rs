//! Terminal host for the feed core: executes requests with ureq and renders
//! the feed as text.

pub mod command;
pub mod config;
pub mod render;
pub mod session;
pub mod transport;

pub use command::{Command, CommandError};
pub use config::Config;
pub use session::Session;
pub use transport::Transport;
