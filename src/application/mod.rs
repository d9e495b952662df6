//! Client state and the operations that keep the page in sync with it.

pub mod api;
pub mod controller;
pub mod error;
pub mod store;
