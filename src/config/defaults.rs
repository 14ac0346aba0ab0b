pub(crate) fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    15
}

pub(crate) fn default_window_width() -> f32 {
    1100.0
}

pub(crate) fn default_window_height() -> f32 {
    760.0
}

pub(crate) fn default_tab() -> String {
    "library".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}

pub(crate) fn default_key_dismiss() -> String {
    "escape".to_string()
}

pub(crate) fn default_key_toggle_stopwatch() -> String {
    "ctrl+p".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "ctrl+q".to_string()
}
