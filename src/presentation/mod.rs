//! Page surface and HTML views.

pub mod page;
pub mod views;
