//! Spatial record types shared by every tier.

use std::cmp::Ordering;
use std::fmt;

/// One level of the spatial hierarchy.
///
/// Tiers are always processed in [`Tier::ALL`] order because levels and units
/// resolve their ancestors through state collected while processing sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// A facility (building, campus site).
    Site,
    /// A floor within a site.
    Level,
    /// A room or space within a level.
    Unit,
}

impl Tier {
    /// All tiers in processing order.
    pub const ALL: [Tier; 3] = [Tier::Site, Tier::Level, Tier::Unit];

    /// Lowercase name used in log output and configuration keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Site => "site",
            Tier::Level => "level",
            Tier::Unit => "unit",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Postal address carried by site records.
///
/// Every field defaults to an empty string when the source omits it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        region: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            region: region.into(),
            postal_code: postal_code.into(),
            country: country.into(),
        }
    }
}

/// Value a tier's records are ordered by before processing.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Total order over sort keys: numbers before text, NaN last among numbers.
    pub fn cmp_key(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Text(String::new())
    }
}

/// Tier-specific identity of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    Site {
        site_id: String,
        address: Address,
    },
    Level {
        level_id: String,
        site_id: String,
    },
    Unit {
        unit_id: String,
        level_id: String,
    },
}

/// A feature read from the spatial source.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialRecord {
    pub kind: RecordKind,
    pub name: String,
    pub location: Coordinates,
    pub sort_key: SortKey,
}

impl SpatialRecord {
    /// Creates a site record, sorted by its x-coordinate.
    pub fn site(
        site_id: impl Into<String>,
        name: impl Into<String>,
        location: Coordinates,
        address: Address,
    ) -> Self {
        Self {
            kind: RecordKind::Site {
                site_id: site_id.into(),
                address,
            },
            name: name.into(),
            sort_key: SortKey::Number(location.x),
            location,
        }
    }

    /// Creates a level record.
    pub fn level(
        level_id: impl Into<String>,
        site_id: impl Into<String>,
        name: impl Into<String>,
        location: Coordinates,
        sort_key: SortKey,
    ) -> Self {
        Self {
            kind: RecordKind::Level {
                level_id: level_id.into(),
                site_id: site_id.into(),
            },
            name: name.into(),
            location,
            sort_key,
        }
    }

    /// Creates a unit record.
    pub fn unit(
        unit_id: impl Into<String>,
        level_id: impl Into<String>,
        name: impl Into<String>,
        location: Coordinates,
        sort_key: SortKey,
    ) -> Self {
        Self {
            kind: RecordKind::Unit {
                unit_id: unit_id.into(),
                level_id: level_id.into(),
            },
            name: name.into(),
            location,
            sort_key,
        }
    }

    /// Identifier of the record in its own source layer.
    pub fn source_id(&self) -> &str {
        match &self.kind {
            RecordKind::Site { site_id, .. } => site_id,
            RecordKind::Level { level_id, .. } => level_id,
            RecordKind::Unit { unit_id, .. } => unit_id,
        }
    }

    pub fn tier(&self) -> Tier {
        match self.kind {
            RecordKind::Site { .. } => Tier::Site,
            RecordKind::Level { .. } => Tier::Level,
            RecordKind::Unit { .. } => Tier::Unit,
        }
    }
}

/// Sorts records by their sort key, keeping source order for ties.
pub fn sort_records(records: &mut [SpatialRecord]) {
    records.sort_by(|a, b| a.sort_key.cmp_key(&b.sort_key));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order() {
        assert_eq!(Tier::ALL, [Tier::Site, Tier::Level, Tier::Unit]);
        assert_eq!(Tier::Level.to_string(), "level");
    }

    #[test]
    fn test_site_sorted_by_x() {
        let site = SpatialRecord::site("F1", "HQ", Coordinates::new(-71.5, 42.1), Address::default());
        assert_eq!(site.sort_key, SortKey::Number(-71.5));
        assert_eq!(site.tier(), Tier::Site);
    }

    #[test]
    fn test_sort_numbers_before_text() {
        let mut keys = vec![
            SortKey::Text("b".into()),
            SortKey::Number(2.0),
            SortKey::Text("a".into()),
            SortKey::Number(-1.0),
        ];
        keys.sort_by(|a, b| a.cmp_key(b));
        assert_eq!(
            keys,
            vec![
                SortKey::Number(-1.0),
                SortKey::Number(2.0),
                SortKey::Text("a".into()),
                SortKey::Text("b".into()),
            ]
        );
    }

    #[test]
    fn test_sort_records_is_stable() {
        let at = Coordinates::default();
        let mut records = vec![
            SpatialRecord::unit("U1", "L1", "first", at, SortKey::Number(1.0)),
            SpatialRecord::unit("U0", "L1", "zero", at, SortKey::Number(0.0)),
            SpatialRecord::unit("U2", "L1", "second", at, SortKey::Number(1.0)),
        ];
        sort_records(&mut records);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zero", "first", "second"]);
    }
}
