//! Configuration file management and plugin settings.

mod manager;

pub use manager::{API_KEY_ENV, ConfigManager, PluginConfig};
