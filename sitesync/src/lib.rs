//! SiteSync - reconcile a site/level/unit hierarchy with a location directory
//!
//! Every spatial feature is synced to one directory node named by its
//! hierarchical path (`site/level/unit`). A run reads the features, resolves
//! each record's parent against a snapshot of the directory, and creates or
//! updates the node. The directory is the only persistent state.
//!
//! # Example
//!
//! ```ignore
//! use sitesync::config::ConfigFile;
//! use sitesync::directory::ReqwestDirectoryClient;
//! use sitesync::sync::SyncRunner;
//!
//! let config = ConfigFile::load()?;
//! let client = ReqwestDirectoryClient::new(config.directory_config()?)?;
//! let runner = SyncRunner::new(config.geojson_source(), client, config.sync_options());
//! let report = runner.run()?;
//! println!("{} created, {} updated", report.total_created(), report.total_updated());
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod reconcile;
pub mod source;
pub mod sync;

pub use error::{SyncError, SyncResult};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
