use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Wellora";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default REST listen port.
pub const DEFAULT_PORT: u16 = 7720;

/// Default Gemini-compatible generation endpoint.
pub const DEFAULT_GENERATION_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta";

/// Model requested from the generation service.
pub const GENERATION_MODEL: &str = "gemini-2.0-flash";

/// Get the application data directory
/// ~/Wellora/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Wellora")
}

/// Path of the application database.
pub fn database_path() -> PathBuf {
    app_data_dir().join("wellora.db")
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,wellora=debug".to_string()
}

/// Generation-service API key, from the environment.
///
/// `None` means the insight pipeline cannot run; the intake and
/// assessment paths still work offline.
pub fn generation_api_key() -> Option<String> {
    std::env::var("WELLORA_GEMINI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
}

/// Generation-service base URL, overridable for self-hosted gateways.
pub fn generation_base_url() -> String {
    std::env::var("WELLORA_GEMINI_BASE_URL")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GENERATION_BASE_URL.to_string())
}
