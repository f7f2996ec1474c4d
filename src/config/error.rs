//! Configuration-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing `config.yml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `save` was called before `load` picked a file
    #[error("No configuration file chosen yet")]
    NoFilePath,

    /// No home directory to put the default configuration in
    #[error("Could not locate a home directory for the default configuration")]
    NoHomeDirectory,

    #[error("Could not read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid YAML for the configuration layout
    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Could not encode configuration: {0}")]
    Encode(#[source] serde_yaml::Error),

    /// Log level in the file is not one `log` understands
    #[error("Unknown log level '{0}'")]
    InvalidLogLevel(String),
}
