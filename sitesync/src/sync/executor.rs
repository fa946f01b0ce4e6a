//! Create-or-update decisions and their execution.

use std::fmt;

use tracing::debug;

use crate::directory::{DirectoryClient, DirectoryResult, NodePayload, RemoteSnapshot};

/// What to do with one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    Create,
    /// Update the existing node with this external id.
    Update(String),
}

impl fmt::Display for SyncDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncDecision::Create => f.write_str("create"),
            SyncDecision::Update(id) => write!(f, "update {}", id),
        }
    }
}

/// Decides between create and update for a record synced as `effective_path`.
///
/// With `keep_duplicates` every record is created, even when a node with the
/// same path already exists.
pub fn decide(effective_path: &str, snapshot: &RemoteSnapshot, keep_duplicates: bool) -> SyncDecision {
    if keep_duplicates {
        return SyncDecision::Create;
    }
    match snapshot.external_id(effective_path) {
        Some(id) => SyncDecision::Update(id.to_string()),
        None => SyncDecision::Create,
    }
}

/// Issues decided calls against the directory.
pub struct SyncExecutor<'a, C: DirectoryClient + ?Sized> {
    client: &'a C,
    dry_run: bool,
}

impl<'a, C: DirectoryClient + ?Sized> SyncExecutor<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            dry_run: false,
        }
    }

    /// Decide but never call the directory.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sends `payload` as a create or an update.
    pub fn execute(&self, decision: &SyncDecision, payload: &NodePayload) -> DirectoryResult<()> {
        if self.dry_run {
            debug!(%decision, name = %payload.name, "Dry run, skipping directory call");
            return Ok(());
        }

        match decision {
            SyncDecision::Create => self.client.create(payload),
            SyncDecision::Update(external_id) => self.client.update(external_id, payload),
        }
    }
}
