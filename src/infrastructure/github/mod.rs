//! GitHub Search API adapter.

pub mod client;
pub mod pacer;
pub mod types;

pub use client::{GithubClient, GithubClientConfig};
pub use pacer::RequestPacer;
