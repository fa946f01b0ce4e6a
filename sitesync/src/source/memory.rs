//! In-memory spatial source.

use super::{SourceResult, SpatialRecord, SpatialSource, Tier};

/// Spatial source backed by records held in memory.
///
/// Records are split by tier on insertion and returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sites: Vec<SpatialRecord>,
    levels: Vec<SpatialRecord>,
    units: Vec<SpatialRecord>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record to the tier matching its kind.
    pub fn with_record(mut self, record: SpatialRecord) -> Self {
        self.push(record);
        self
    }

    pub fn push(&mut self, record: SpatialRecord) {
        match record.tier() {
            Tier::Site => self.sites.push(record),
            Tier::Level => self.levels.push(record),
            Tier::Unit => self.units.push(record),
        }
    }
}

impl FromIterator<SpatialRecord> for MemorySource {
    fn from_iter<I: IntoIterator<Item = SpatialRecord>>(iter: I) -> Self {
        let mut source = MemorySource::new();
        for record in iter {
            source.push(record);
        }
        source
    }
}

impl SpatialSource for MemorySource {
    fn read(&self, tier: Tier) -> SourceResult<Vec<SpatialRecord>> {
        Ok(match tier {
            Tier::Site => self.sites.clone(),
            Tier::Level => self.levels.clone(),
            Tier::Unit => self.units.clone(),
        })
    }

    fn describe(&self, tier: Tier) -> String {
        format!("{} records (memory)", tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Address, Coordinates, SortKey};

    #[test]
    fn test_records_split_by_tier() {
        let at = Coordinates::default();
        let source: MemorySource = vec![
            SpatialRecord::unit("U1", "L1", "101", at, SortKey::default()),
            SpatialRecord::site("F1", "HQ", at, Address::default()),
            SpatialRecord::level("L1", "F1", "1", at, SortKey::Number(1.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(source.read(Tier::Site).unwrap().len(), 1);
        assert_eq!(source.read(Tier::Level).unwrap()[0].name, "1");
        assert_eq!(source.read(Tier::Unit).unwrap()[0].name, "101");
    }
}
