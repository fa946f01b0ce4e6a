//! Addressable configuration keys.
//!
//! Every setting is named `section.key`, e.g. `directory.url`. Keys are used
//! both to map the ini file and by the `config get/set` commands.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ConfigFile};

/// A single configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    DirectoryUrl,
    DirectoryUsername,
    DirectoryPassword,
    DirectoryMaxRecords,
    SyncKeepDuplicates,
    SyncRootPrefix,
    SyncDelimiter,
    SourceSites,
    SourceLevels,
    SourceUnits,
    LoggingFile,
}

impl ConfigKey {
    /// Every key, in file order.
    pub const ALL: [ConfigKey; 11] = [
        ConfigKey::DirectoryUrl,
        ConfigKey::DirectoryUsername,
        ConfigKey::DirectoryPassword,
        ConfigKey::DirectoryMaxRecords,
        ConfigKey::SyncKeepDuplicates,
        ConfigKey::SyncRootPrefix,
        ConfigKey::SyncDelimiter,
        ConfigKey::SourceSites,
        ConfigKey::SourceLevels,
        ConfigKey::SourceUnits,
        ConfigKey::LoggingFile,
    ];

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::DirectoryUrl
            | ConfigKey::DirectoryUsername
            | ConfigKey::DirectoryPassword
            | ConfigKey::DirectoryMaxRecords => "directory",
            ConfigKey::SyncKeepDuplicates | ConfigKey::SyncRootPrefix | ConfigKey::SyncDelimiter => {
                "sync"
            }
            ConfigKey::SourceSites | ConfigKey::SourceLevels | ConfigKey::SourceUnits => "source",
            ConfigKey::LoggingFile => "logging",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ConfigKey::DirectoryUrl => "url",
            ConfigKey::DirectoryUsername => "username",
            ConfigKey::DirectoryPassword => "password",
            ConfigKey::DirectoryMaxRecords => "max_records",
            ConfigKey::SyncKeepDuplicates => "keep_duplicates",
            ConfigKey::SyncRootPrefix => "root_prefix",
            ConfigKey::SyncDelimiter => "delimiter",
            ConfigKey::SourceSites => "sites",
            ConfigKey::SourceLevels => "levels",
            ConfigKey::SourceUnits => "units",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key())
    }

    /// True for values that should not be echoed.
    pub fn is_secret(&self) -> bool {
        matches!(self, ConfigKey::DirectoryPassword)
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default()
        };
        match self {
            ConfigKey::DirectoryUrl => config.directory.url.clone(),
            ConfigKey::DirectoryUsername => config.directory.username.clone(),
            ConfigKey::DirectoryPassword => config.directory.password.clone(),
            ConfigKey::DirectoryMaxRecords => config.directory.max_records.to_string(),
            ConfigKey::SyncKeepDuplicates => config.sync.keep_duplicates.to_string(),
            ConfigKey::SyncRootPrefix => config.sync.root_prefix.clone(),
            ConfigKey::SyncDelimiter => config.sync.delimiter.clone(),
            ConfigKey::SourceSites => path(&config.source.sites),
            ConfigKey::SourceLevels => path(&config.source.levels),
            ConfigKey::SourceUnits => path(&config.source.units),
            ConfigKey::LoggingFile => path(&config.logging.file),
        }
    }

    /// Parses `value` and stores it in `config`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let path = |v: &str| {
            let v = v.trim();
            (!v.is_empty()).then(|| PathBuf::from(v))
        };
        match self {
            ConfigKey::DirectoryUrl => config.directory.url = value.trim().to_string(),
            ConfigKey::DirectoryUsername => config.directory.username = value.to_string(),
            ConfigKey::DirectoryPassword => config.directory.password = value.to_string(),
            ConfigKey::DirectoryMaxRecords => {
                config.directory.max_records = self.parse_positive(value)?
            }
            ConfigKey::SyncKeepDuplicates => config.sync.keep_duplicates = self.parse_bool(value)?,
            ConfigKey::SyncRootPrefix => config.sync.root_prefix = value.trim().to_string(),
            ConfigKey::SyncDelimiter => {
                if value.is_empty() {
                    return Err(self.invalid(value, "delimiter must not be empty"));
                }
                config.sync.delimiter = value.to_string();
            }
            ConfigKey::SourceSites => config.source.sites = path(value),
            ConfigKey::SourceLevels => config.source.levels = path(value),
            ConfigKey::SourceUnits => config.source.units = path(value),
            ConfigKey::LoggingFile => config.logging.file = path(value),
        }
        Ok(())
    }

    fn parse_bool(&self, value: &str) -> Result<bool, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" | "" => Ok(false),
            _ => Err(self.invalid(value, "expected true or false")),
        }
    }

    fn parse_positive(&self, value: &str) -> Result<usize, ConfigError> {
        match value.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(self.invalid(value, "expected a positive integer")),
        }
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key())
    }
}
