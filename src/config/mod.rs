//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including where records are kept, the theme, log level and hotkeys.

mod error;
mod hotkeys;

pub use error::ConfigError;
pub use hotkeys::{
    build_footer_text, default_hotkeys, format_hotkey_display, get_action_for_event,
    get_action_for_special_mode, matches_hotkey, Hotkey, HotkeyAction, SpecialMode, ViewHotkeys,
};

use crate::error::AppError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/frc-scout";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory holding saved records. Defaults to the config directory.
    pub data_dir: Option<PathBuf>,
    pub theme_name: String,
    pub log_level: String,
    pub hotkeys: ViewHotkeys,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub hotkeys: ViewHotkeys,
}

fn default_theme_name() -> String {
    "ocean".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding defaults.
    ///
    pub fn new() -> Config {
        Config {
            data_dir: None,
            theme_name: default_theme_name(),
            log_level: default_log_level(),
            hotkeys: ViewHotkeys::default(),
            file_path: None,
        }
    }

    /// Load the configuration from the custom directory if provided, else
    /// from the default one. A missing file is created holding the defaults
    /// so it can be edited by hand.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        self.file_path = Some(file_path.clone());

        if !file_path.exists() {
            log::info!("Writing default configuration to {}", file_path.display());
            return self.save();
        }

        let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::ReadFailed {
            path: file_path.clone(),
            source: e,
        })?;
        let data: FileSpec =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: file_path.clone(),
                source: e,
            })?;
        self.data_dir = data.data_dir;
        self.theme_name = data.theme_name;
        self.log_level = data.log_level;
        self.hotkeys = data.hotkeys;
        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::NoFilePath)?;
        let data = FileSpec {
            data_dir: self.data_dir.clone(),
            theme_name: self.theme_name.clone(),
            log_level: self.log_level.clone(),
            hotkeys: self.hotkeys.clone(),
        };
        let content = serde_yaml::to_string(&data).map_err(ConfigError::Encode)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(file_path, content).map_err(|e| ConfigError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the directory records are stored in.
    ///
    pub fn data_dir(&self) -> Result<PathBuf, AppError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        match self.file_path.as_ref().and_then(|path| path.parent()) {
            Some(dir) => Ok(dir.to_path_buf()),
            None => Config::default_path(),
        }
    }

    /// Parse the configured log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::NoHomeDirectory.into()),
        }
    }
}
