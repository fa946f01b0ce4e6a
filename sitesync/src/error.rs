//! Run-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::directory::DirectoryError;
use crate::source::{SourceError, Tier};

/// Result type for sync runs.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that abort a sync run.
///
/// A run stops at the first error; nothing already synced is rolled back.
/// Missing parents are not errors, they are reported as warnings.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Reading spatial records failed.
    #[error("failed to read source records: {0}")]
    Source(#[from] SourceError),

    /// The directory snapshot for a tier could not be fetched.
    #[error("failed to fetch directory snapshot for {tier} tier: {source}")]
    Snapshot {
        tier: Tier,
        #[source]
        source: DirectoryError,
    },

    /// Creating or updating a record failed.
    #[error("failed to sync {tier} '{path}': {source}")]
    Record {
        tier: Tier,
        path: String,
        #[source]
        source: DirectoryError,
    },

    /// Configuration is incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The directory client could not be set up.
    #[error("failed to set up directory client: {0}")]
    Client(DirectoryError),
}
