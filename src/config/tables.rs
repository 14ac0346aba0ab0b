use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct ConfigTables {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    keys: KeysConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            base_url: tables.server.base_url,
            email: tables.server.email,
            password: tables.server.password,
            request_timeout_secs: tables.server.request_timeout_secs,
            theme: tables.ui.theme,
            window_width: tables.ui.window_width,
            window_height: tables.ui.window_height,
            default_tab: tables.ui.default_tab,
            key_dismiss: tables.keys.key_dismiss,
            key_toggle_stopwatch: tables.keys.key_toggle_stopwatch,
            key_safe_quit: tables.keys.key_safe_quit,
            log_level: tables.logging.log_level,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
    #[serde(default = "defaults::default_base_url")]
    base_url: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default = "defaults::default_request_timeout_secs")]
    request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::default_base_url(),
            email: String::new(),
            password: String::new(),
            request_timeout_secs: defaults::default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct UiConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_tab")]
    default_tab: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            default_tab: defaults::default_tab(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_dismiss")]
    key_dismiss: String,
    #[serde(default = "defaults::default_key_toggle_stopwatch")]
    key_toggle_stopwatch: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    key_safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            key_dismiss: defaults::default_key_dismiss(),
            key_toggle_stopwatch: defaults::default_key_toggle_stopwatch(),
            key_safe_quit: defaults::default_key_safe_quit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::default_log_level(),
        }
    }
}
