//! Transport trait definition
//!
//! This module defines the `Transport` trait that abstracts over how request URLs are fetched.

use super::Result;

/// Fetches the body of a GET request
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET request and return the response body as text
    async fn get(&self, url: &str) -> Result<String>;
}
