//! HTTP adapters.

pub mod client;

pub use client::HttpPostsApi;
