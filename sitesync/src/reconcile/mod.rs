//! Reconciliation of records against the directory snapshot.

mod payload;
mod resolve;

pub use payload::build_payload;
pub use resolve::{resolve, ReconcileWarning, Resolution};
