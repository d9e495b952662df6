//! Domain layer: form drafts, validation and author filtering.

pub mod error;
pub mod posts;
