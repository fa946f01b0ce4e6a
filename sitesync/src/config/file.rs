//! The on-disk configuration file.
//!
//! Settings live in an ini file at `~/.sitesync/config.ini`:
//!
//! ```ini
//! [directory]
//! url = https://dir.example.com/api/locations
//! username = sync
//! password =
//! max_records = 10000
//!
//! [sync]
//! keep_duplicates = false
//! root_prefix =
//! delimiter = /
//!
//! [source]
//! sites = /data/facilities.geojson
//! levels = /data/levels.geojson
//! units = /data/units.geojson
//!
//! [logging]
//! file = /var/log/sitesync.log
//! ```
//!
//! Missing keys keep their defaults. CLI arguments override file values.

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;

use super::{ConfigError, ConfigKey};
use crate::directory::DirectoryConfig;
use crate::hierarchy::DEFAULT_DELIMITER;
use crate::source::GeoJsonSource;
use crate::sync::{SyncOptions, DEFAULT_MAX_RECORDS};

/// Name of the per-user config directory under the home directory.
const CONFIG_DIR_NAME: &str = ".sitesync";

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.ini";

/// Path of the user's config file.
pub fn config_file_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// `[directory]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySettings {
    pub url: String,
    pub username: String,
    pub password: String,
    pub max_records: usize,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: String::new(),
            password: String::new(),
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

/// `[sync]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub keep_duplicates: bool,
    pub root_prefix: String,
    pub delimiter: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            keep_duplicates: false,
            root_prefix: String::new(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

/// `[source]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSettings {
    pub sites: Option<PathBuf>,
    pub levels: Option<PathBuf>,
    pub units: Option<PathBuf>,
}

/// `[logging]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    pub file: Option<PathBuf>,
}

/// All settings stored in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub directory: DirectorySettings,
    pub sync: SyncSettings,
    pub source: SourceSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Loads the user's config file, or defaults when it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Loads a config file, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config = Self::default();
        for key in ConfigKey::ALL {
            if let Some(value) = ini.get_from(Some(key.section()), key.key()) {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Saves to the user's config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Saves to `path`, creating its directory when needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDirFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut ini = Ini::new();
        for key in ConfigKey::ALL {
            ini.with_section(Some(key.section()))
                .set(key.key(), key.get(self));
        }
        ini.write_to_file(path)
            .map_err(|source| ConfigError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Directory connection settings; the URL must be set.
    pub fn directory_config(&self) -> Result<DirectoryConfig, ConfigError> {
        if self.directory.url.trim().is_empty() {
            return Err(ConfigError::Missing("directory.url", "url"));
        }
        Ok(DirectoryConfig::new(self.directory.url.trim())
            .with_credentials(&self.directory.username, &self.directory.password))
    }

    /// Sync options from the `[sync]` and `[directory]` sections.
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions::new()
            .with_keep_duplicates(self.sync.keep_duplicates)
            .with_root_prefix(&self.sync.root_prefix)
            .with_delimiter(&self.sync.delimiter)
            .with_max_records(self.directory.max_records)
    }

    /// GeoJSON source over the configured feature files.
    pub fn geojson_source(&self) -> GeoJsonSource {
        let mut source = GeoJsonSource::new();
        if let Some(path) = &self.source.sites {
            source = source.with_sites(path);
        }
        if let Some(path) = &self.source.levels {
            source = source.with_levels(path);
        }
        if let Some(path) = &self.source.units {
            source = source.with_units(path);
        }
        source
    }
}
