//! # formkit-core
//!
//! Core types, settings, and error types for the formkit workspace.
//! This crate has no formkit dependencies and provides the foundation for
//! the forms and macros crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Text helpers used for naming and error messages
//! - [`settings`] - Global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormError, FormResult, ValidationError};
pub use settings::{Settings, SETTINGS};
