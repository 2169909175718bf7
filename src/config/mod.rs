//! Observatory Configuration Module
//!
//! Process-wide configuration loaded from TOML with environment overrides.
//!
//! ## Loading Order
//!
//! 1. `SOLARIS_CONFIG` environment variable (path to TOML file)
//! 2. `solaris.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(ObservatoryConfig::load());
//!
//! // Anywhere in the codebase:
//! let url = &config::get().feeds.xray_url;
//! ```

mod observatory;

pub use observatory::*;

use std::sync::OnceLock;

/// Global observatory configuration, initialized once at startup.
static OBSERVATORY_CONFIG: OnceLock<ObservatoryConfig> = OnceLock::new();

/// Initialize the global configuration.
///
/// Must be called exactly once before any calls to `get()`.
pub fn init(config: ObservatoryConfig) {
    if OBSERVATORY_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once — ignoring");
    }
}

/// Get a reference to the global configuration.
///
/// Panics if `init()` has not been called. A missing config is a fatal
/// startup error, not a recoverable condition.
pub fn get() -> &'static ObservatoryConfig {
    OBSERVATORY_CONFIG
        .get()
        .expect("config::get() called before config::init() — this is a startup bug")
}

/// Check whether the config has been initialized.
///
/// Useful for tests and optional config paths.
pub fn is_initialized() -> bool {
    OBSERVATORY_CONFIG.get().is_some()
}
