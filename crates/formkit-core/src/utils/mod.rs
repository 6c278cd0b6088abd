//! Utility functions for formkit.
//!
//! - [`text`]: inflection helpers used for model naming and error messages.

pub mod text;
