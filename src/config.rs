use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Spinner/redraw tick in milliseconds.
    pub tick_ms: u64,
    /// Seconds before a transient notice clears itself.
    pub notice_secs: u64,
    /// Thumbnail size in terminal cells.
    pub thumb_cols: u16,
    pub thumb_rows: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            notice_secs: 4,
            thumb_cols: 16,
            thumb_rows: 4,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ImagesConfig {
    pub request_timeout_ms: u64,
    /// Responses larger than this are rejected before decoding.
    pub max_bytes: usize,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 8000,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Load the given file, or fall back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.ui.tick_ms, 100);
        assert_eq!(config.ui.notice_secs, 4);
        assert_eq!(config.ui.thumb_cols, 16);
        assert_eq!(config.images.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_partial_config_overrides() {
        let config: Config = toml::from_str(
            r#"
            [ui]
            thumb_cols = 10
            thumb_rows = 3

            [images]
            request_timeout_ms = 2500
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.thumb_cols, 10);
        assert_eq!(config.ui.thumb_rows, 3);
        assert_eq!(config.ui.tick_ms, 100);
        assert_eq!(config.images.request_timeout_ms, 2500);
        assert_eq!(config.images.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(Path::new("definitely-not-here.toml")).unwrap();
        assert_eq!(config.ui.tick_ms, 100);
    }
}
