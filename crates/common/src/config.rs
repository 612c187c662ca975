//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Transcript directories processed when a run gives none explicitly.
    pub input_dirs: Vec<PathBuf>,

    /// Base directory where run output directories are created.
    pub output_base: PathBuf,

    /// External tool settings.
    pub tool: ToolConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Settings for the external analysis tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Binary to invoke (resolved via PATH unless absolute).
    pub binary: String,

    /// Wall-clock timeout per invocation, in seconds.
    pub timeout_secs: u64,

    /// Language code passed to utterance segmentation.
    pub lang: String,

    /// Whether tagging retokenizes to fit UD tokenizations.
    pub retokenize: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "chabatch=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dirs: Vec::new(),
            output_base: PathBuf::from("./analysis_results"),
            tool: ToolConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            binary: "batchalign".to_string(),
            timeout_secs: 300,
            lang: "eng".to_string(),
            retokenize: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("chabatch").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_invocation_contract() {
        let config = AppConfig::default();
        assert_eq!(config.tool.binary, "batchalign");
        assert_eq!(config.tool.timeout_secs, 300);
        assert_eq!(config.tool.lang, "eng");
        assert!(config.tool.retokenize);
        assert_eq!(config.output_base, PathBuf::from("./analysis_results"));
        assert!(config.input_dirs.is_empty());
    }

    #[test]
    fn save_and_load_use_the_standard_location() {
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", tmp.path());

        let mut config = AppConfig::default();
        config.tool.lang = "nld".to_string();
        config.save().unwrap();

        let path = config_file_path();
        assert!(path.starts_with(tmp.path()));
        assert!(path.is_file());

        let loaded = AppConfig::load();
        assert_eq!(loaded.tool.lang, "nld");

        std::env::remove_var("XDG_CONFIG_HOME");
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = AppConfig::default();
        config.input_dirs = vec![PathBuf::from("./ENNI_B1_TD"), PathBuf::from("./ENNI_B1_DLD")];
        config.tool.timeout_secs = 60;

        let json = serde_json::to_string(&config).unwrap();
        let loaded: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.input_dirs, config.input_dirs);
        assert_eq!(loaded.tool.timeout_secs, 60);
        assert_eq!(loaded.logging.level, "info");
    }
}
