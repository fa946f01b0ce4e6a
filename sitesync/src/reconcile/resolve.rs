//! Parent resolution against the directory snapshot.
//!
//! A record keeps its full path only while its parent exists in the
//! directory. Otherwise the record degrades to its bare name so that it still
//! syncs, disconnected from the missing ancestor:
//!
//! | parent path | in snapshot | effective path | parent field | warning            |
//! |-------------|-------------|----------------|--------------|--------------------|
//! | non-empty   | yes         | full path      | parent name  | none               |
//! | non-empty   | no          | bare name      | empty        | missing in directory |
//! | empty       | n/a         | bare name      | empty        | missing in source  |
//!
//! Once the parent is created, a later run switches the record from its bare
//! name to its full path; matching always uses the path resolved here.

use std::fmt;

use crate::directory::RemoteSnapshot;
use crate::hierarchy::RecordPath;

/// Non-fatal problem found while resolving a record's parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileWarning {
    /// The parent path is not in the directory snapshot.
    MissingInDirectory { full_path: String },
    /// The record has no ancestor at all.
    MissingInSource { full_path: String },
}

impl fmt::Display for ReconcileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileWarning::MissingInDirectory { full_path } => {
                write!(f, "{} has no parent in the directory", full_path)
            }
            ReconcileWarning::MissingInSource { full_path } => {
                write!(f, "{} has no parent in the source layer", full_path)
            }
        }
    }
}

/// Outcome of resolving one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Path the record is matched and synced under.
    pub effective_path: String,
    /// Value of the payload's parent field.
    pub parent: String,
    pub warning: Option<ReconcileWarning>,
}

/// Resolves the effective path and parent field of a record named `name`.
pub fn resolve(name: &str, path: &RecordPath, snapshot: &RemoteSnapshot) -> Resolution {
    if path.parent_path.is_empty() {
        return Resolution {
            effective_path: name.to_string(),
            parent: String::new(),
            warning: Some(ReconcileWarning::MissingInSource {
                full_path: path.full_path.clone(),
            }),
        };
    }

    if snapshot.contains_path(&path.parent_path) {
        Resolution {
            effective_path: path.full_path.clone(),
            parent: path.parent_name.clone(),
            warning: None,
        }
    } else {
        Resolution {
            effective_path: name.to_string(),
            parent: String::new(),
            warning: Some(ReconcileWarning::MissingInDirectory {
                full_path: path.full_path.clone(),
            }),
        }
    }
}
