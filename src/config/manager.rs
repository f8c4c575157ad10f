use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::paths;

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "DEEPL_API_KEY";

/// Plugin settings, stored as `config.toml` in the config directory.
///
/// The plugin's top-level instance is the single owner of this struct;
/// the dispatcher and translation client only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// DeepL API key. Empty means "not configured".
    pub api_key: String,
    /// Default target language for outgoing translations (e.g., `EN-US`, `DE`).
    pub target_lang: String,
    /// Translate incoming messages automatically (shown locally only).
    pub auto_translate_incoming: bool,
    /// Target language for incoming auto-translation.
    pub auto_incoming_target_lang: String,
    /// Preserve line breaks and bold/italic markers across translation.
    pub preserve_formatting: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            target_lang: "EN-US".to_string(),
            auto_translate_incoming: false,
            auto_incoming_target_lang: "EN-GB".to_string(),
            preserve_formatting: true,
        }
    }
}

impl PluginConfig {
    /// Returns `true` if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Replaces the configured API key with the value of [`API_KEY_ENV`],
    /// when that variable is set and non-empty.
    ///
    /// Called once at startup so the rest of the plugin never reads the
    /// process environment.
    pub fn apply_env_override(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.api_key = key;
        }
    }
}

/// Manages loading and saving the plugin configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/deepl-chat/config.toml`
    /// or `~/.config/deepl-chat/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self {
            config_path: paths::config_dir().join("config.toml"),
        }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<PluginConfig> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config: PluginConfig =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    pub fn save(&self, config: &PluginConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    pub fn load_or_default(&self) -> PluginConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager {
            config_path: temp_dir.path().join("config.toml"),
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let config = PluginConfig {
            api_key: "secret".to_string(),
            target_lang: "DE".to_string(),
            auto_translate_incoming: true,
            auto_incoming_target_lang: "EN-GB".to_string(),
            preserve_formatting: false,
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let result = manager.load();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let config = manager.load_or_default();
        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        fs::write(manager.config_path(), "target_lang = \"JA\"\n").unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.target_lang, "JA");
        assert_eq!(loaded.auto_incoming_target_lang, "EN-GB");
        assert!(loaded.preserve_formatting);
        assert!(!loaded.has_api_key());
    }

    #[test]
    fn test_default_config() {
        let config = PluginConfig::default();

        assert_eq!(config.target_lang, "EN-US");
        assert_eq!(config.auto_incoming_target_lang, "EN-GB");
        assert!(!config.auto_translate_incoming);
        assert!(config.preserve_formatting);
        assert!(!config.has_api_key());
    }

    #[test]
    #[serial(deepl_api_key)]
    fn test_env_override_replaces_file_key() {
        // SAFETY: guarded by #[serial]; restored below
        unsafe { std::env::set_var(API_KEY_ENV, "env-key") };

        let mut config = PluginConfig {
            api_key: "file-key".to_string(),
            ..PluginConfig::default()
        };
        config.apply_env_override();

        assert_eq!(config.api_key, "env-key");

        unsafe { std::env::remove_var(API_KEY_ENV) };
    }

    #[test]
    #[serial(deepl_api_key)]
    fn test_env_override_keeps_file_key_when_unset() {
        // SAFETY: guarded by #[serial]
        unsafe { std::env::remove_var(API_KEY_ENV) };

        let mut config = PluginConfig {
            api_key: "file-key".to_string(),
            ..PluginConfig::default()
        };
        config.apply_env_override();

        assert_eq!(config.api_key, "file-key");
    }
}
