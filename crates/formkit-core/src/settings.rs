//! Settings for formkit.
//!
//! This module provides the [`Settings`] struct, which holds the small amount
//! of configuration the forms layer needs, and [`LazySettings`], a
//! globally-accessible, lazily-initialized settings instance.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// The complete set of formkit settings.
///
/// # Examples
///
/// ```
/// use formkit_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.utc_offset, "+00:00");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled. Selects pretty logging over JSON.
    pub debug: bool,

    /// The log level or `EnvFilter` directive (e.g. "info", "formkit_forms=debug").
    pub log_level: String,

    /// Offset applied to times parsed without an explicit zone, as `+HH:MM` or `-HH:MM`.
    pub utc_offset: String,

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            utc_offset: "+00:00".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Resolves [`utc_offset`](Self::utc_offset) into a [`FixedOffset`].
    ///
    /// Malformed values resolve to UTC and log a warning.
    pub fn offset(&self) -> FixedOffset {
        parse_offset(&self.utc_offset).unwrap_or_else(|| {
            tracing::warn!(utc_offset = %self.utc_offset, "invalid utc_offset, using UTC");
            Utc.fix()
        })
    }
}

/// Parses `+HH:MM`, `-HH:MM`, `+HHMM`, `Z`, or `UTC` into a fixed offset.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Some(Utc.fix());
    }
    s.parse::<FixedOffset>().ok()
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them. Library code
/// that must work without explicit configuration uses
/// [`get_or_default`](LazySettings::get_or_default).
pub struct LazySettings {
    inner: OnceLock<Settings>,
    fallback: OnceLock<Settings>,
    inner_offset: OnceLock<FixedOffset>,
    fallback_offset: OnceLock<FixedOffset>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
            fallback: OnceLock::new(),
            inner_offset: OnceLock::new(),
            fallback_offset: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, or the defaults when none were configured.
    ///
    /// The defaults are not stored as the configuration, so a later
    /// [`configure`](LazySettings::configure) still succeeds.
    pub fn get_or_default(&self) -> &Settings {
        self.inner
            .get()
            .unwrap_or_else(|| self.fallback.get_or_init(Settings::default))
    }

    /// The resolved [`Settings::offset`] of [`get_or_default`](LazySettings::get_or_default).
    ///
    /// Resolved once per settings instance, so a malformed `utc_offset` is
    /// reported once rather than on every use.
    pub fn offset(&self) -> FixedOffset {
        match self.inner.get() {
            Some(settings) => *self.inner_offset.get_or_init(|| settings.offset()),
            None => *self
                .fallback_offset
                .get_or_init(|| self.get_or_default().offset()),
        }
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
