//! Sync orchestration.
//!
//! [`SyncRunner`] drives the tiers in order, [`decide`] picks create or
//! update for each record, and [`SyncExecutor`] issues the call.

mod executor;
mod options;
mod report;
mod runner;

pub use executor::{decide, SyncDecision, SyncExecutor};
pub use options::{SyncOptions, DEFAULT_MAX_RECORDS};
pub use report::{RecordOutcome, SyncReport, TierReport};
pub use runner::SyncRunner;
