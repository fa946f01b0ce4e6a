//! CLI error type.

use std::fmt;

use sitesync::config::ConfigError;
use sitesync::SyncError;

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded, edited or saved.
    Config(ConfigError),

    /// Logging could not be initialized.
    Logging(String),

    /// The sync run aborted.
    Sync(SyncError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "{}", e),
            CliError::Logging(msg) => write!(f, "{}", msg),
            CliError::Sync(e) => write!(f, "sync aborted: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Logging(_) => None,
            CliError::Sync(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<SyncError> for CliError {
    fn from(e: SyncError) -> Self {
        CliError::Sync(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_error_display() {
        let err: CliError = SyncError::Config(ConfigError::Missing("directory.url", "url")).into();
        assert!(err.to_string().starts_with("sync aborted:"));
        assert!(err.to_string().contains("directory.url"));
    }
}
