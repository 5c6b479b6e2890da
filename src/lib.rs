#![doc = "gitbook-sync: publish a directory of markdown files into a GitBook space."]

//! The library holds the whole pipeline so it can be driven from tests with a
//! mocked [`contract::ContentApi`]; the binary only parses flags and calls
//! [`cli::run`].

pub mod cli;
pub mod client;
pub mod config;
pub mod content_path;
pub mod contract;
pub mod error;
pub mod files;
pub mod group;
pub mod identity;
pub mod load_config;
pub mod progress;
pub mod synchronise;

pub use cli::{run, Cli, Commands};
pub use config::SyncRequest;
pub use error::{ApiError, SyncError};
pub use synchronise::{synchronise, SyncReport};
