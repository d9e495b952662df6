//! postboard: a client for a JSON `/posts` resource that keeps a post list,
//! a detail view and create/edit forms consistent with a single store.

pub mod application;
pub mod config;
pub mod domain;
pub mod host;
pub mod infra;
pub mod presentation;
mod util;
