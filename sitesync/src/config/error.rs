//! Configuration errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, editing or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read or parsed.
    #[error("failed to read config {}: {reason}", .path.display())]
    ReadFailed { path: PathBuf, reason: String },

    /// The config file could not be written.
    #[error("failed to write config {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// The config directory could not be created.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// No such `section.key`.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    /// A value does not parse for its key.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// A setting required for the run is not set.
    #[error("{0} is not set; use --{1} or set it in the config file")]
    Missing(&'static str, &'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_display() {
        let err = ConfigError::Missing("directory.url", "url");
        assert_eq!(
            err.to_string(),
            "directory.url is not set; use --url or set it in the config file"
        );
    }
}
