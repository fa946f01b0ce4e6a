//! Tier-by-tier sync orchestration.
//!
//! ```text
//! read sites + levels ──► LookupIndex
//!
//! for tier in [site, level, unit]:
//!     fetch snapshot (once)
//!     sort records
//!     for record:
//!         build path ─► resolve parent ─► assemble payload ─► create | update
//! ```
//!
//! Everything runs sequentially on the calling thread. The first error aborts
//! the run; records synced before it are not rolled back.

use tracing::{debug, info, warn};

use crate::directory::{DirectoryClient, RemoteSnapshot};
use crate::error::{SyncError, SyncResult};
use crate::hierarchy::{AddressCache, LookupIndex, PathBuilder};
use crate::reconcile::{build_payload, resolve};
use crate::source::{sort_records, RecordKind, SpatialRecord, SpatialSource, Tier};

use super::{decide, RecordOutcome, SyncExecutor, SyncOptions, SyncReport, TierReport};

/// Runs a complete sync of a spatial source against a directory.
pub struct SyncRunner<S, C> {
    source: S,
    client: C,
    options: SyncOptions,
}

impl<S: SpatialSource, C: DirectoryClient> SyncRunner<S, C> {
    pub fn new(source: S, client: C, options: SyncOptions) -> Self {
        Self {
            source,
            client,
            options,
        }
    }

    /// Syncs every tier in order.
    pub fn run(&self) -> SyncResult<SyncReport> {
        let sites = self.source.read(Tier::Site)?;
        let levels = self.source.read(Tier::Level)?;
        let index = LookupIndex::build(&sites, &levels);
        let mut addresses = AddressCache::new();

        info!(
            sites = sites.len(),
            levels = levels.len(),
            dry_run = self.options.dry_run,
            keep_duplicates = self.options.keep_duplicates,
            "Starting sync"
        );

        let mut report = SyncReport {
            tiers: Vec::with_capacity(Tier::ALL.len()),
            dry_run: self.options.dry_run,
        };
        report
            .tiers
            .push(self.sync_tier(Tier::Site, sites, &index, &mut addresses)?);
        report
            .tiers
            .push(self.sync_tier(Tier::Level, levels, &index, &mut addresses)?);
        let units = self.source.read(Tier::Unit)?;
        report
            .tiers
            .push(self.sync_tier(Tier::Unit, units, &index, &mut addresses)?);

        info!(
            created = report.total_created(),
            updated = report.total_updated(),
            warnings = report.total_warnings(),
            "Sync complete"
        );
        Ok(report)
    }

    /// Syncs the records of one tier against a fresh snapshot.
    pub fn sync_tier(
        &self,
        tier: Tier,
        mut records: Vec<SpatialRecord>,
        index: &LookupIndex,
        addresses: &mut AddressCache,
    ) -> SyncResult<TierReport> {
        info!(%tier, count = records.len(), "Processing {}", self.source.describe(tier));

        let mut report = TierReport::new(tier);
        // Sites always fetch so connectivity problems surface before any work.
        if records.is_empty() && tier != Tier::Site {
            return Ok(report);
        }

        let snapshot = RemoteSnapshot::fetch(&self.client, self.options.max_records)
            .map_err(|source| SyncError::Snapshot { tier, source })?;
        report.snapshot_size = snapshot.len();

        sort_records(&mut records);

        let paths = PathBuilder::new(&self.options.root_prefix, self.options.delimiter.as_str());
        let executor = SyncExecutor::new(&self.client).with_dry_run(self.options.dry_run);

        for record in &records {
            let path = paths.build(record, index);
            let resolution = resolve(&record.name, &path, &snapshot);
            if let Some(warning) = &resolution.warning {
                warn!(%tier, "{}", warning);
            }

            if let RecordKind::Site { address, .. } = &record.kind {
                addresses.insert(record.name.clone(), address.clone());
            }

            let payload = build_payload(record, &path, &resolution, addresses);
            let decision = decide(
                &resolution.effective_path,
                &snapshot,
                self.options.keep_duplicates,
            );
            debug!(
                %tier,
                id = record.source_id(),
                path = %resolution.effective_path,
                parent = %resolution.parent,
                %decision,
                "Syncing record"
            );

            executor
                .execute(&decision, &payload)
                .map_err(|source| SyncError::Record {
                    tier,
                    path: resolution.effective_path.clone(),
                    source,
                })?;

            report.outcomes.push(RecordOutcome {
                source_id: record.source_id().to_string(),
                name: record.name.clone(),
                effective_path: resolution.effective_path,
                parent: resolution.parent,
                decision,
                warning: resolution.warning,
            });
        }

        info!(
            %tier,
            created = report.created(),
            updated = report.updated(),
            "Finished tier"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{DirectoryOperation, MockDirectoryClient};
    use crate::source::{Address, Coordinates, MemorySource, SortKey};
    use crate::sync::SyncDecision;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_record(SpatialRecord::site(
                "F1",
                "RED O",
                Coordinates::new(-71.0, 42.0),
                Address::new("100 Main St", "Town", "TS", "12345", "US"),
            ))
            .with_record(SpatialRecord::level(
                "L1",
                "F1",
                "O1",
                Coordinates::new(-71.0, 42.0),
                SortKey::Number(1.0),
            ))
    }

    #[test]
    fn test_fetches_once_per_non_empty_tier() {
        let client = MockDirectoryClient::new();
        let runner = SyncRunner::new(source(), &client, SyncOptions::default().with_max_records(25));

        let report = runner.run().unwrap();
        // Site and level fetch; the empty unit tier does not.
        assert_eq!(client.fetch_limits(), vec![25, 25]);
        assert_eq!(report.tiers.len(), 3);
        assert!(report.tier(Tier::Unit).unwrap().outcomes.is_empty());
    }

    #[test]
    fn test_empty_site_tier_still_fetches() {
        let client = MockDirectoryClient::new();
        let runner = SyncRunner::new(MemorySource::new(), &client, SyncOptions::default());

        runner.run().unwrap();
        assert_eq!(client.fetch_limits().len(), 1);
    }

    #[test]
    fn test_one_fetch_per_tier_with_several_records() {
        let at = Coordinates::new(-71.0, 42.0);
        let source = source()
            .with_record(SpatialRecord::site("F2", "BLUE", Coordinates::new(-70.0, 42.0), Address::default()))
            .with_record(SpatialRecord::level("L2", "F1", "O2", at, SortKey::Number(2.0)))
            .with_record(SpatialRecord::level("L3", "F2", "B1", at, SortKey::Number(1.0)));
        let client = MockDirectoryClient::new();
        let runner = SyncRunner::new(source, &client, SyncOptions::default().with_max_records(40));

        let report = runner.run().unwrap();
        assert_eq!(report.tier(Tier::Site).unwrap().outcomes.len(), 2);
        assert_eq!(report.tier(Tier::Level).unwrap().outcomes.len(), 3);
        // Two sites and three levels still cost one fetch per tier.
        assert_eq!(client.fetch_limits(), vec![40, 40]);
    }

    #[test]
    fn test_snapshot_is_not_refreshed_within_tier() {
        // Two sites share a name. The first is created during the pass, but
        // the second is decided against the same stale snapshot.
        let at = Coordinates::new(-71.0, 42.0);
        let source = MemorySource::new()
            .with_record(SpatialRecord::site("F1", "RED O", at, Address::default()))
            .with_record(SpatialRecord::site("F2", "RED O", at, Address::default()));
        let client = MockDirectoryClient::new();

        let report = SyncRunner::new(source, &client, SyncOptions::default())
            .run()
            .unwrap();
        let sites = report.tier(Tier::Site).unwrap();
        assert_eq!(sites.outcomes.len(), 2);
        assert!(sites
            .outcomes
            .iter()
            .all(|o| o.effective_path == "RED O" && o.decision == SyncDecision::Create));
        assert_eq!(client.created().len(), 2);
        assert_eq!(client.fetch_limits().len(), 1);
    }

    #[test]
    fn test_outcomes_carry_source_ids() {
        let client = MockDirectoryClient::new();
        let report = SyncRunner::new(source(), &client, SyncOptions::default())
            .run()
            .unwrap();

        let ids: Vec<&str> = report
            .tiers
            .iter()
            .flat_map(|t| t.outcomes.iter())
            .map(|o| o.source_id.as_str())
            .collect();
        assert_eq!(ids, vec!["F1", "L1"]);
    }

    #[test]
    fn test_root_prefix_with_trailing_delimiter() {
        let client = MockDirectoryClient::new().with_node("Corp", "root");
        let options = SyncOptions::default().with_root_prefix("Corp/");
        let report = SyncRunner::new(source(), &client, options).run().unwrap();

        let site = &report.tier(Tier::Site).unwrap().outcomes[0];
        assert_eq!(site.effective_path, "Corp/RED O");
        assert_eq!(site.parent, "Corp");
        assert_eq!(site.warning, None);
        assert_eq!(client.created()[0].parent, "Corp");
    }

    #[test]
    fn test_sites_sorted_by_x() {
        let at = |x| Coordinates::new(x, 0.0);
        let source = MemorySource::new()
            .with_record(SpatialRecord::site("F2", "East", at(10.0), Address::default()))
            .with_record(SpatialRecord::site("F1", "West", at(-10.0), Address::default()))
            .with_record(SpatialRecord::site("F3", "Middle", at(0.0), Address::default()));
        let client = MockDirectoryClient::new();

        SyncRunner::new(source, &client, SyncOptions::default())
            .run()
            .unwrap();

        let names: Vec<String> = client.created().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["West", "Middle", "East"]);
    }

    #[test]
    fn test_dry_run_issues_no_writes() {
        let client = MockDirectoryClient::new();
        let runner = SyncRunner::new(source(), &client, SyncOptions::default().with_dry_run(true));

        let report = runner.run().unwrap();
        assert!(report.dry_run);
        assert_eq!(report.total_created(), 2);
        assert!(client.created().is_empty());
        assert!(client.updated().is_empty());
    }

    #[test]
    fn test_fetch_failure_aborts() {
        let client = MockDirectoryClient::new().failing_on(DirectoryOperation::Fetch, 401);
        let runner = SyncRunner::new(source(), &client, SyncOptions::default());

        let err = runner.run().unwrap_err();
        assert!(matches!(err, SyncError::Snapshot { tier: Tier::Site, .. }));
        assert!(client.created().is_empty());
    }

    #[test]
    fn test_create_failure_stops_remaining_records() {
        let client = MockDirectoryClient::new().failing_on(DirectoryOperation::Create, 400);
        let runner = SyncRunner::new(source(), &client, SyncOptions::default());

        let err = runner.run().unwrap_err();
        match err {
            SyncError::Record { tier, path, .. } => {
                assert_eq!(tier, Tier::Site);
                assert_eq!(path, "RED O");
            }
            other => panic!("unexpected error: {}", other),
        }
        // Only the site fetch and the failed create were issued.
        assert_eq!(client.calls().len(), 2);
    }

    #[test]
    fn test_update_failure_stops_remaining_records() {
        let client = MockDirectoryClient::new()
            .with_node("RED O", "abc")
            .failing_on(DirectoryOperation::Update, 500);
        let runner = SyncRunner::new(source(), &client, SyncOptions::default());

        let err = runner.run().unwrap_err();
        match err {
            SyncError::Record { tier, path, source } => {
                assert_eq!(tier, Tier::Site);
                assert_eq!(path, "RED O");
                assert_eq!(source.status(), Some(500));
            }
            other => panic!("unexpected error: {}", other),
        }
        // The level tier never started.
        assert_eq!(client.fetch_limits().len(), 1);
        assert_eq!(client.updated().len(), 1);
        assert!(client.created().is_empty());
    }
}
