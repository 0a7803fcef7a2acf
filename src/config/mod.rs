//! Configuration management module.
//!
//! This module loads the API token, the target board and tuning settings
//! from the configuration file, then applies environment overrides.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::monday::{CachePolicy, RetryPolicy, DEFAULT_API_URL};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/monday-tui";

pub const TOKEN_ENV: &str = "MONDAY_API_TOKEN";
pub const BOARD_ENV: &str = "MONDAY_BOARD_ID";
pub const API_URL_ENV: &str = "MONDAY_API_URL";

/// Schema cache settings.
///
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct CacheSettings {
    pub stale_time_secs: u64,
    pub eviction_time_secs: u64,
    pub retries: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            stale_time_secs: 300,
            eviction_time_secs: 600,
            retries: 3,
            retry_base_delay_ms: 1000,
            retry_max_delay_ms: 30000,
        }
    }
}

impl CacheSettings {
    pub fn policy(&self) -> CachePolicy {
        CachePolicy {
            stale_time: Duration::from_secs(self.stale_time_secs),
            eviction_time: Duration::from_secs(self.eviction_time_secs),
            retry: RetryPolicy {
                retries: self.retries,
                base_delay: Duration::from_millis(self.retry_base_delay_ms),
                max_delay: Duration::from_millis(self.retry_max_delay_ms),
            },
            ..CachePolicy::default()
        }
    }
}

/// Item creation settings.
///
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct CreateSettings {
    pub retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for CreateSettings {
    fn default() -> Self {
        CreateSettings {
            retries: 1,
            retry_delay_ms: 1000,
        }
    }
}

impl CreateSettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.retries, Duration::from_millis(self.retry_delay_ms))
    }
}

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub access_token: Option<String>,
    pub board_id: Option<String>,
    pub api_url: String,
    pub theme_name: String,
    pub cache: CacheSettings,
    pub create: CreateSettings,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct FileSpec {
    access_token: Option<String>,
    board_id: Option<BoardIdSpec>,
    api_url: Option<String>,
    theme_name: Option<String>,
    cache: CacheSettings,
    create: CreateSettings,
}

/// Board ids may be written as YAML numbers or strings.
///
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum BoardIdSpec {
    Number(u64),
    Text(String),
}

impl From<BoardIdSpec> for String {
    fn from(spec: BoardIdSpec) -> String {
        match spec {
            BoardIdSpec::Number(n) => n.to_string(),
            BoardIdSpec::Text(s) => s,
        }
    }
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            access_token: None,
            board_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            theme_name: default_theme_name(),
            cache: CacheSettings::default(),
            create: CreateSettings::default(),
            file_path: None,
        }
    }

    /// Load the configuration file from the custom directory if provided or
    /// the default directory otherwise, then apply environment overrides. A
    /// missing file leaves the defaults in place.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };
        let file_path = dir_path.join(Path::new(FILE_NAME));

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            self.apply_file(&contents)?;
        }
        self.file_path = Some(file_path);

        self.apply_overrides(|key| std::env::var(key).ok());
        Ok(())
    }

    /// Apply the settings found in the YAML contents of a configuration file.
    ///
    pub fn apply_file(&mut self, contents: &str) -> Result<(), ConfigError> {
        if contents.trim().is_empty() {
            return Ok(());
        }
        let data: FileSpec = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        if let Some(token) = data.access_token {
            self.access_token = Some(token);
        }
        if let Some(board_id) = data.board_id {
            self.board_id = Some(board_id.into());
        }
        if let Some(api_url) = data.api_url {
            self.api_url = api_url;
        }
        if let Some(theme_name) = data.theme_name {
            self.theme_name = theme_name;
        }
        self.cache = data.cache;
        self.create = data.create;
        Ok(())
    }

    /// Apply environment overrides read through the given lookup. Blank
    /// values are ignored.
    ///
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(token) = read(TOKEN_ENV) {
            self.access_token = Some(token);
        }
        if let Some(board_id) = read(BOARD_ENV) {
            self.board_id = Some(board_id);
        }
        if let Some(api_url) = read(API_URL_ENV) {
            self.api_url = api_url;
        }
    }

    /// Override the target board.
    ///
    pub fn set_board_id(&mut self, board_id: &str) -> &mut Self {
        self.board_id = Some(board_id.to_owned());
        self
    }

    /// Returns the names of required settings that have no value.
    ///
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());
        let mut missing = vec![];
        if blank(&self.access_token) {
            missing.push(TOKEN_ENV);
        }
        if blank(&self.board_id) {
            missing.push(BOARD_ENV);
        }
        missing
    }

    /// Returns the access token, or an error if it is not set.
    ///
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingSetting(TOKEN_ENV))
    }

    /// Returns the message shown when required settings are missing, or
    /// `None` if the configuration is complete.
    ///
    pub fn notice(&self) -> Option<String> {
        let missing = self.missing_settings();
        if missing.is_empty() {
            return None;
        }
        let location = self
            .file_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| format!("~/{}/{}", DEFAULT_DIRECTORY_PATH, FILE_NAME));
        Some(format!(
            "Please set {} in the environment or a .env file, or add access_token and board_id to {}.",
            missing.join(" and "),
            location
        ))
    }

    /// Returns the path of the configuration file once loaded.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Return the default file path for the configuration directory.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        let home_dir = dirs::home_dir().ok_or(ConfigError::HomeDirectoryNotFound)?;
        Ok(home_dir.join(Path::new(DEFAULT_DIRECTORY_PATH)))
    }
}
