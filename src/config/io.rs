use super::PASSWORD_ENV;
use super::models::AppConfig;
use super::tables::ConfigTables;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load the config at `path`, falling back to defaults for anything unreadable.
pub fn load_config(path: &Path) -> AppConfig {
    let mut config = match fs::read_to_string(path) {
        Ok(contents) => {
            info!(path = %path.display(), "Loaded base config");
            match parse_config(&contents) {
                Ok(config) => {
                    debug!("Parsed configuration from disk");
                    config
                }
                Err(err) => {
                    warn!(path = %path.display(), "Invalid config TOML: {err}");
                    AppConfig::default()
                }
            }
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            AppConfig::default()
        }
    };

    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        if !password.is_empty() {
            debug!(var = PASSWORD_ENV, "Using password from environment");
            config.password = password;
        }
    }
    config
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str::<ConfigTables>(contents).map(AppConfig::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ThemeMode};

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").expect("empty config");
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.default_tab, "library");
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.has_credentials());
    }

    #[test]
    fn tables_are_flattened() {
        let config = parse_config(
            r#"
            [server]
            base_url = "https://reading.example.org"
            email = "ana@example.org"
            password = "secret"

            [ui]
            theme = "day"
            default_tab = "timer"

            [keys]
            key_toggle_stopwatch = "ctrl+space"

            [logging]
            log_level = "debug"
            "#,
        )
        .expect("valid config");
        assert_eq!(config.base_url, "https://reading.example.org");
        assert!(config.has_credentials());
        assert_eq!(config.theme, ThemeMode::Day);
        assert_eq!(config.default_tab, "timer");
        assert_eq!(config.key_toggle_stopwatch, "ctrl+space");
        assert_eq!(config.key_safe_quit, "ctrl+q");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        assert!(parse_config("[logging]\nlog_level = \"loud\"\n").is_err());
    }
}
