//! Reusable UI pieces: the error page, the site header and the loading indicator.

pub mod error_template;
pub mod header;
pub mod loader;
