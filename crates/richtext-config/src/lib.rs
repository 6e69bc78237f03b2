use richtext_engine::{DefaultStyle, Style};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read style file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse style file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Layout settings read from a TOML style file.
///
/// Every key is optional; missing keys fall back to [`DefaultStyle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub max_image_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment_limit: Option<usize>,
    pub paragraph_break: usize,
    /// Where compiled documents are written when no path is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let style = DefaultStyle::default();
        Self {
            max_image_width: style.max_image_width,
            fragment_limit: style.fragment_limit,
            paragraph_break: style.paragraph_break,
            store_path: None,
        }
    }
}

impl StyleConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: StyleConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.store_path = config
            .store_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/richtext");
        PathBuf::from(config_dir.as_ref()).join("style.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

impl Style for StyleConfig {
    fn max_image_width(&self) -> u32 {
        self.max_image_width
    }

    fn fragment_limit(&self) -> Option<usize> {
        self.fragment_limit.filter(|limit| *limit > 0)
    }

    fn paragraph_break(&self) -> usize {
        self.paragraph_break
    }
}
