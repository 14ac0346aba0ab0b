//! Configuration loading for the reading tracker client.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` (or the path given on the command line) if present.
//! Any missing or invalid entries fall back to sensible defaults so the UI
//! can still launch.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::load_config;
pub use models::{AppConfig, LogLevel, ThemeMode};

/// Environment variable that overrides `server.password`.
pub const PASSWORD_ENV: &str = "READING_TRACKER_PASSWORD";
