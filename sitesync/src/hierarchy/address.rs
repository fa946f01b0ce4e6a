//! Site addresses captured for descendant tiers.

use crate::source::Address;

/// Address of one site, keyed by the site's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub name: String,
    pub address: Address,
}

/// Addresses observed while processing the site tier.
///
/// Entries are appended for the lifetime of one run and never removed.
#[derive(Debug, Clone, Default)]
pub struct AddressCache {
    entries: Vec<AddressRecord>,
}

impl AddressCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, address: Address) {
        self.entries.push(AddressRecord {
            name: name.into(),
            address,
        });
    }

    /// Address of the first cached site with this name.
    pub fn lookup(&self, site_name: &str) -> Option<&Address> {
        if site_name.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.name == site_name)
            .map(|entry| &entry.address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let mut cache = AddressCache::new();
        cache.insert("RED O", Address::new("100 Main St", "Town", "TS", "12345", "US"));

        let address = cache.lookup("RED O").unwrap();
        assert_eq!(address.city, "Town");
        assert!(cache.lookup("BLUE").is_none());
    }

    #[test]
    fn test_first_entry_wins_for_duplicate_names() {
        let mut cache = AddressCache::new();
        cache.insert("HQ", Address::new("1 First St", "", "", "", ""));
        cache.insert("HQ", Address::new("2 Second St", "", "", "", ""));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.lookup("HQ").unwrap().street, "1 First St");
    }

    #[test]
    fn test_empty_name_never_matches() {
        let mut cache = AddressCache::new();
        cache.insert("", Address::default());
        assert!(cache.lookup("").is_none());
    }
}
