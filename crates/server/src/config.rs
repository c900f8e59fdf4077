use shared_types::{AppConfig, BackendConfig, FeatureFlags};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Parse `config.toml` contents. Unparseable input falls back to defaults.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(path = CONFIG_PATH, error = %e, "Failed to parse config, using defaults");
        AppConfig::default()
    })
}

/// Apply `BACKEND_URL` and `BACKEND_TIMEOUT_SECS` on top of the file values.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("BACKEND_URL").filter(|u| !u.trim().is_empty()) {
        config.backend.base_url = url.trim().to_string();
    }
    if let Some(secs) = lookup("BACKEND_TIMEOUT_SECS").and_then(|s| s.trim().parse().ok()) {
        config.backend.timeout_secs = secs;
    }
}

/// Read `config.toml` and the environment once and keep the result for the
/// life of the process. Later calls are no-ops.
pub fn load_config() {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let mut config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => parse_config(&contents),
            Err(e) => {
                tracing::warn!(path = CONFIG_PATH, error = %e, "Config file not found, using defaults");
                AppConfig::default()
            }
        };
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        tracing::info!(
            features = ?config.features,
            backend = %config.backend.base_url,
            timeout_secs = config.backend.timeout_secs,
            "Configuration loaded"
        );
        config
    });
}

/// Loaded configuration, or defaults if `load_config()` has not run.
pub fn app_config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

pub fn feature_flags() -> &'static FeatureFlags {
    &app_config().features
}

pub fn backend_config() -> &'static BackendConfig {
    &app_config().backend
}
