//! Summary of a sync run.

use crate::reconcile::ReconcileWarning;
use crate::source::Tier;

use super::SyncDecision;

/// What happened to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Identifier of the record in its source layer.
    pub source_id: String,
    pub name: String,
    pub effective_path: String,
    pub parent: String,
    pub decision: SyncDecision,
    pub warning: Option<ReconcileWarning>,
}

/// Outcomes of one tier pass, in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct TierReport {
    pub tier: Tier,
    /// Number of nodes in the snapshot used for this pass.
    pub snapshot_size: usize,
    pub outcomes: Vec<RecordOutcome>,
}

impl TierReport {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            snapshot_size: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.decision == SyncDecision::Create)
            .count()
    }

    pub fn updated(&self) -> usize {
        self.outcomes.len() - self.created()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ReconcileWarning> {
        self.outcomes.iter().filter_map(|o| o.warning.as_ref())
    }
}

/// Outcomes of a complete run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncReport {
    pub tiers: Vec<TierReport>,
    /// True when no create or update call was issued.
    pub dry_run: bool,
}

impl SyncReport {
    pub fn tier(&self, tier: Tier) -> Option<&TierReport> {
        self.tiers.iter().find(|t| t.tier == tier)
    }

    pub fn total_created(&self) -> usize {
        self.tiers.iter().map(TierReport::created).sum()
    }

    pub fn total_updated(&self) -> usize {
        self.tiers.iter().map(TierReport::updated).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.tiers.iter().map(|t| t.warnings().count()).sum()
    }

    /// Effective paths of every record, in processing order.
    pub fn effective_paths(&self) -> impl Iterator<Item = &str> {
        self.tiers
            .iter()
            .flat_map(|t| t.outcomes.iter())
            .map(|o| o.effective_path.as_str())
    }
}
