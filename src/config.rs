use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/messaging.json";

/// Location of the on-disk preference store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    "data/messaging.db".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Load the config file, falling back to defaults when it is missing or
/// unparseable.
pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Per-invocation temp path so parallel tests don't collide.
    fn temp_config_path() -> String {
        let pid = std::process::id();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("mock-chat-db-{pid}-{ts}"))
            .join("messaging.json")
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config("/nonexistent/messaging.json");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let path = temp_config_path();
        let config = AppConfig {
            database_path: "elsewhere/chat.db".to_string(),
        };

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path), config);
    }
}
