//! Configuration file handling.

mod error;
mod file;
mod keys;

pub use error::ConfigError;
pub use file::{
    config_file_path, ConfigFile, DirectorySettings, LoggingSettings, SourceSettings,
    SyncSettings,
};
pub use keys::ConfigKey;
