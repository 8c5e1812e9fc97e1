//! Client module
//!
//! This module provides HTTP client functionality to query the SKELL corpus service.

mod corpus;
mod http;
mod trait_def;
pub mod urls;
mod wire;

// Re-export the trait and types
pub use corpus::SkellClient;
pub use http::{
    ClientConfig, HttpTransport, Result, SkellError, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};
pub use trait_def::Transport;
