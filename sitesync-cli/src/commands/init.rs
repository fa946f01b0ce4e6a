//! Init command - write the configuration file.

use sitesync::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
///
/// Existing settings are kept; missing ones are written with defaults.
pub fn run() -> Result<(), CliError> {
    let path = config_file_path();
    let existed = path.exists();

    let config = ConfigFile::load()?;
    config.save()?;

    if existed {
        println!("Updated configuration file: {}", path.display());
    } else {
        println!("Created configuration file: {}", path.display());
    }
    println!();
    println!("Set the directory URL before syncing:");
    println!("  sitesync config set directory.url https://dir.example.com/api/locations");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
