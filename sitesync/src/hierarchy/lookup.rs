//! Id-to-name lookups built from site and level records.

use std::collections::HashMap;

use crate::source::{RecordKind, SpatialRecord};

/// Name lookups used to resolve the ancestors of levels and units.
///
/// Built once before any tier is processed and never modified afterwards.
/// A level whose site id matches no site has no entry in the level-to-site
/// map; callers treat the missing entry as an unknown ancestor.
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    site_names: HashMap<String, String>,
    level_names: HashMap<String, String>,
    level_site_names: HashMap<String, String>,
}

impl LookupIndex {
    /// Builds the index from the full site and level record sets.
    ///
    /// Records of other tiers are ignored. Later duplicates of an id replace
    /// earlier ones.
    pub fn build(sites: &[SpatialRecord], levels: &[SpatialRecord]) -> Self {
        let site_names: HashMap<String, String> = sites
            .iter()
            .filter_map(|record| match &record.kind {
                RecordKind::Site { site_id, .. } => Some((site_id.clone(), record.name.clone())),
                _ => None,
            })
            .collect();

        let mut level_names = HashMap::new();
        let mut level_site_names = HashMap::new();
        for record in levels {
            if let RecordKind::Level { level_id, site_id } = &record.kind {
                level_names.insert(level_id.clone(), record.name.clone());
                if let Some(site_name) = site_names.get(site_id) {
                    level_site_names.insert(level_id.clone(), site_name.clone());
                }
            }
        }

        Self {
            site_names,
            level_names,
            level_site_names,
        }
    }

    pub fn site_name(&self, site_id: &str) -> Option<&str> {
        self.site_names.get(site_id).map(String::as_str)
    }

    pub fn level_name(&self, level_id: &str) -> Option<&str> {
        self.level_names.get(level_id).map(String::as_str)
    }

    /// Name of the site containing the level.
    pub fn level_site_name(&self, level_id: &str) -> Option<&str> {
        self.level_site_names.get(level_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Address, Coordinates, SortKey};

    fn fixture() -> LookupIndex {
        let at = Coordinates::default();
        let sites = vec![SpatialRecord::site("F1", "RED O", at, Address::default())];
        let levels = vec![
            SpatialRecord::level("L1", "F1", "O1", at, SortKey::Number(1.0)),
            SpatialRecord::level("L9", "F404", "Orphan", at, SortKey::Number(1.0)),
        ];
        LookupIndex::build(&sites, &levels)
    }

    #[test]
    fn test_resolves_names() {
        let index = fixture();
        assert_eq!(index.site_name("F1"), Some("RED O"));
        assert_eq!(index.level_name("L1"), Some("O1"));
        assert_eq!(index.level_site_name("L1"), Some("RED O"));
    }

    #[test]
    fn test_dangling_site_reference_has_no_entry() {
        let index = fixture();
        assert_eq!(index.level_name("L9"), Some("Orphan"));
        assert_eq!(index.level_site_name("L9"), None);
    }

    #[test]
    fn test_unknown_ids() {
        let index = LookupIndex::default();
        assert_eq!(index.site_name("F1"), None);
        assert_eq!(index.level_name("L1"), None);
    }
}
