//! Localized label messages
//!
//! This crate handles:
//! - Bundled English and Japanese message catalogs
//! - Locale resolution with a fallback locale
//! - `:placeholder` substitution in message templates

pub mod bundled;
pub mod catalog;
pub mod placeholder;

pub use catalog::LocaleCatalog;
pub use placeholder::render;
