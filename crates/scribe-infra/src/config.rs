//! Global configuration loader for Scribe.
//!
//! Reads `config.toml` from the data directory (`~/.scribe/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use scribe_types::config::GlobalConfig;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - A `posts_per_page` of zero is raised to one.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(mut config) => {
            config.posts_per_page = config.posts_per_page.max(1);
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Resolve the data directory.
///
/// Priority:
/// 1. `SCRIBE_DATA_DIR` environment variable
/// 2. `~/.scribe`
/// 3. `.scribe` in the current directory
pub fn resolve_data_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("SCRIBE_DATA_DIR") {
        return dir.into();
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".scribe");
    }

    ".scribe".into()
}
