//! Declared field names for each tier.
//!
//! Attributes are always resolved by name. A [`TierSchema`] is validated once
//! against the field names a source declares, so a renamed or missing column
//! fails the run up front instead of shifting values between fields.

use std::collections::BTreeSet;

use super::{SourceError, SourceResult, Tier};

/// Field names for site features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFields {
    pub id: String,
    pub name: String,
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl Default for SiteFields {
    fn default() -> Self {
        Self {
            id: "FACILITY_ID".to_string(),
            name: "NAME".to_string(),
            street: "ADDRESS".to_string(),
            city: "LOCALITY".to_string(),
            region: "PROVINCE".to_string(),
            postal_code: "POSTAL_CODE".to_string(),
            country: "COUNTRY".to_string(),
        }
    }
}

/// Field names for level features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFields {
    pub id: String,
    pub site_id: String,
    pub name: String,
    pub sort: String,
}

impl Default for LevelFields {
    fn default() -> Self {
        Self {
            id: "LEVEL_ID".to_string(),
            site_id: "FACILITY_ID".to_string(),
            name: "NAME".to_string(),
            sort: "VERTICAL_ORDER".to_string(),
        }
    }
}

/// Field names for unit features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFields {
    pub id: String,
    pub level_id: String,
    pub name: String,
    pub sort: String,
}

impl Default for UnitFields {
    fn default() -> Self {
        Self {
            id: "UNIT_ID".to_string(),
            level_id: "LEVEL_ID".to_string(),
            name: "NAME".to_string(),
            sort: "NAME".to_string(),
        }
    }
}

/// Field names for all three tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierSchema {
    pub site: SiteFields,
    pub level: LevelFields,
    pub unit: UnitFields,
}

impl TierSchema {
    /// Fields that must be present on every feature of the tier.
    ///
    /// Site address fields are optional and never listed here.
    pub fn required_fields(&self, tier: Tier) -> Vec<&str> {
        match tier {
            Tier::Site => vec![self.site.id.as_str(), self.site.name.as_str()],
            Tier::Level => vec![
                self.level.id.as_str(),
                self.level.site_id.as_str(),
                self.level.name.as_str(),
                self.level.sort.as_str(),
            ],
            Tier::Unit => vec![
                self.unit.id.as_str(),
                self.unit.level_id.as_str(),
                self.unit.name.as_str(),
                self.unit.sort.as_str(),
            ],
        }
    }

    /// Checks that every required field of `tier` is declared.
    pub fn validate(&self, tier: Tier, declared: &BTreeSet<String>) -> SourceResult<()> {
        match self
            .required_fields(tier)
            .into_iter()
            .find(|field| !declared.contains(*field))
        {
            Some(field) => Err(SourceError::MissingField {
                tier,
                field: field.to_string(),
            }),
            None => Ok(()),
        }
    }
}
