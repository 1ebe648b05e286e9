use serde::{Deserialize, Serialize};
use slack_markdown_engine::{ConvertOptions, NameTable, OutputStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read users file at {users_path}: {source}")]
    UsersFileReadError {
        users_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse users file at {users_path}: {source}")]
    UsersFileParseError {
        users_path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_style: OutputStyle,
    pub include_thread_info: bool,
    pub report_partial: bool,
    /// JSON object mapping user ids to display names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_file: Option<PathBuf>,
    /// Inline user id to display name entries; these win over `users_file`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub users: BTreeMap<String, String>,
}

impl Config {
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

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the users file path
        config.users_file = config
            .users_file
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/slack-markdown");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Conversion options as configured.
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            style: self.output_style,
            include_thread_info: self.include_thread_info,
            report_partial: self.report_partial,
        }
    }

    /// Entries from `users_file` overlaid with the inline `[users]` table.
    pub fn name_table(&self) -> Result<NameTable, ConfigError> {
        let mut names = match &self.users_file {
            Some(path) => read_users_file(path)?,
            None => NameTable::new(),
        };
        names.extend(self.users.iter().map(|(id, name)| (id.clone(), name.clone())));
        Ok(names)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

/// Reads a JSON object of user id to display name.
pub fn read_users_file<P: AsRef<Path>>(users_path: P) -> Result<NameTable, ConfigError> {
    let users_path = users_path.as_ref();
    let content =
        std::fs::read_to_string(users_path).map_err(|source| ConfigError::UsersFileReadError {
            users_path: users_path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::UsersFileParseError {
        users_path: users_path.to_path_buf(),
        source,
    })
}
