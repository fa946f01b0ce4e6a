//! GeoJSON feature files as a spatial source.
//!
//! Each tier is read from its own FeatureCollection file. Attributes come from
//! the feature `properties` object and are looked up by the names declared in
//! the [`TierSchema`]; the position comes from the feature geometry.
//!
//! # Geometry
//!
//! - `Point` uses its coordinates directly.
//! - `Polygon` and `MultiPolygon` use the vertex mean of the first exterior
//!   ring, which is close enough to label a room or a floor.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{
    Address, Coordinates, SortKey, SourceError, SourceResult, SpatialRecord, SpatialSource, Tier,
    TierSchema,
};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Point {
        coordinates: Vec<f64>,
    },
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    fn location(&self) -> Result<Coordinates, String> {
        match self {
            Geometry::Point { coordinates } => position(coordinates),
            Geometry::Polygon { coordinates } => coordinates
                .first()
                .ok_or_else(|| "polygon has no rings".to_string())
                .and_then(|ring| ring_center(ring)),
            Geometry::MultiPolygon { coordinates } => coordinates
                .first()
                .and_then(|polygon| polygon.first())
                .ok_or_else(|| "multipolygon has no rings".to_string())
                .and_then(|ring| ring_center(ring)),
            Geometry::Unsupported => Err("unsupported geometry type".to_string()),
        }
    }
}

fn position(coordinates: &[f64]) -> Result<Coordinates, String> {
    match coordinates {
        [x, y, ..] => Ok(Coordinates::new(*x, *y)),
        _ => Err("position needs two ordinates".to_string()),
    }
}

fn ring_center(ring: &[Vec<f64>]) -> Result<Coordinates, String> {
    // Closed rings repeat the first vertex at the end.
    let vertices = match ring {
        [first, rest @ .., last] if first == last && !rest.is_empty() => &ring[..ring.len() - 1],
        _ => ring,
    };
    if vertices.is_empty() {
        return Err("ring has no vertices".to_string());
    }

    let mut sum = Coordinates::default();
    for vertex in vertices {
        let point = position(vertex)?;
        sum.x += point.x;
        sum.y += point.y;
    }
    let count = vertices.len() as f64;
    Ok(Coordinates::new(sum.x / count, sum.y / count))
}

/// Reads site, level and unit features from GeoJSON files.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonSource {
    sites: Option<PathBuf>,
    levels: Option<PathBuf>,
    units: Option<PathBuf>,
    schema: TierSchema,
}

impl GeoJsonSource {
    /// Creates a source with no files; every tier reads as empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the site feature file.
    pub fn with_sites(mut self, path: impl Into<PathBuf>) -> Self {
        self.sites = Some(path.into());
        self
    }

    /// Set the level feature file.
    pub fn with_levels(mut self, path: impl Into<PathBuf>) -> Self {
        self.levels = Some(path.into());
        self
    }

    /// Set the unit feature file.
    pub fn with_units(mut self, path: impl Into<PathBuf>) -> Self {
        self.units = Some(path.into());
        self
    }

    /// Override the declared field names.
    pub fn with_schema(mut self, schema: TierSchema) -> Self {
        self.schema = schema;
        self
    }

    fn path(&self, tier: Tier) -> Option<&Path> {
        match tier {
            Tier::Site => self.sites.as_deref(),
            Tier::Level => self.levels.as_deref(),
            Tier::Unit => self.units.as_deref(),
        }
    }

    fn load(&self, path: &Path) -> SourceResult<FeatureCollection> {
        let contents = fs::read_to_string(path).map_err(|source| SourceError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|e| SourceError::ParseFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn to_record(&self, tier: Tier, index: usize, feature: &Feature) -> SourceResult<SpatialRecord> {
        let empty = Map::new();
        let props = Properties {
            tier,
            values: feature.properties.as_ref().unwrap_or(&empty),
        };

        let location = feature
            .geometry
            .as_ref()
            .ok_or_else(|| "feature has no geometry".to_string())
            .and_then(Geometry::location)
            .map_err(|reason| SourceError::InvalidGeometry {
                tier,
                index,
                reason,
            })?;

        let schema = &self.schema;
        let record = match tier {
            Tier::Site => {
                let fields = &schema.site;
                let address = Address::new(
                    props.optional(&fields.street)?,
                    props.optional(&fields.city)?,
                    props.optional(&fields.region)?,
                    props.optional(&fields.postal_code)?,
                    props.optional(&fields.country)?,
                );
                SpatialRecord::site(
                    props.required(&fields.id)?,
                    props.required(&fields.name)?,
                    location,
                    address,
                )
            }
            Tier::Level => {
                let fields = &schema.level;
                SpatialRecord::level(
                    props.required(&fields.id)?,
                    props.required(&fields.site_id)?,
                    props.required(&fields.name)?,
                    location,
                    props.sort_key(&fields.sort)?,
                )
            }
            Tier::Unit => {
                let fields = &schema.unit;
                SpatialRecord::unit(
                    props.required(&fields.id)?,
                    props.required(&fields.level_id)?,
                    props.required(&fields.name)?,
                    location,
                    props.sort_key(&fields.sort)?,
                )
            }
        };
        Ok(record)
    }
}

impl SpatialSource for GeoJsonSource {
    fn read(&self, tier: Tier) -> SourceResult<Vec<SpatialRecord>> {
        let Some(path) = self.path(tier) else {
            debug!(%tier, "No feature file configured");
            return Ok(Vec::new());
        };

        let collection = self.load(path)?;
        if let Some(first) = collection.features.first() {
            let declared: BTreeSet<String> = first
                .properties
                .as_ref()
                .map(|p| p.keys().cloned().collect())
                .unwrap_or_default();
            self.schema.validate(tier, &declared)?;
        }

        collection
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| self.to_record(tier, index, feature))
            .collect()
    }

    fn describe(&self, tier: Tier) -> String {
        match self.path(tier) {
            Some(path) => format!("{} features ({})", tier, path.display()),
            None => format!("{} features (none)", tier),
        }
    }
}

/// Named attribute access over a feature's properties.
struct Properties<'a> {
    tier: Tier,
    values: &'a Map<String, Value>,
}

impl Properties<'_> {
    fn required(&self, field: &str) -> SourceResult<String> {
        match self.values.get(field) {
            Some(value) => Ok(self.text(field, value)?.unwrap_or_default()),
            None => Err(SourceError::MissingField {
                tier: self.tier,
                field: field.to_string(),
            }),
        }
    }

    fn optional(&self, field: &str) -> SourceResult<String> {
        match self.values.get(field) {
            Some(value) => Ok(self.text(field, value)?.unwrap_or_default()),
            None => Ok(String::new()),
        }
    }

    fn sort_key(&self, field: &str) -> SourceResult<SortKey> {
        match self.values.get(field) {
            Some(Value::Number(n)) => Ok(SortKey::Number(n.as_f64().unwrap_or(f64::NAN))),
            Some(value) => Ok(SortKey::Text(self.text(field, value)?.unwrap_or_default())),
            None => Err(SourceError::MissingField {
                tier: self.tier,
                field: field.to_string(),
            }),
        }
    }

    fn text(&self, field: &str, value: &Value) -> SourceResult<Option<String>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.trim().to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            Value::Number(n) => Ok(Some(number_text(n))),
            other => Err(SourceError::InvalidValue {
                tier: self.tier,
                field: field.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Renders integral numbers without a fractional part (`3.0` becomes `3`).
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_features(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_sites_with_address() {
        let file = write_features(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[-71.25,42.5]},
                 "properties":{"FACILITY_ID":"F1","NAME":"RED O","ADDRESS":"100 Main St",
                   "LOCALITY":"Town","PROVINCE":"TS","POSTAL_CODE":12345,"COUNTRY":"US"}}
            ]}"#,
        );
        let source = GeoJsonSource::new().with_sites(file.path());

        let records = source.read(Tier::Site).unwrap();
        assert_eq!(records.len(), 1);
        let site = &records[0];
        assert_eq!(site.name, "RED O");
        assert_eq!(site.location, Coordinates::new(-71.25, 42.5));
        assert_eq!(
            site.kind,
            crate::source::RecordKind::Site {
                site_id: "F1".to_string(),
                address: Address::new("100 Main St", "Town", "TS", "12345", "US"),
            }
        );
    }

    #[test]
    fn test_missing_address_fields_default_to_empty() {
        let file = write_features(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]},
                 "properties":{"FACILITY_ID":"F1","NAME":"HQ","LOCALITY":null}}
            ]}"#,
        );
        let records = GeoJsonSource::new()
            .with_sites(file.path())
            .read(Tier::Site)
            .unwrap();
        match &records[0].kind {
            crate::source::RecordKind::Site { address, .. } => {
                assert_eq!(address, &Address::default())
            }
            other => panic!("expected site, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_uses_ring_center() {
        let file = write_features(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[0,0],[2,0],[2,2],[0,2],[0,0]]]},
                 "properties":{"LEVEL_ID":"L1","FACILITY_ID":"F1","NAME":"O1","VERTICAL_ORDER":0}}
            ]}"#,
        );
        let records = GeoJsonSource::new()
            .with_levels(file.path())
            .read(Tier::Level)
            .unwrap();
        assert_eq!(records[0].location, Coordinates::new(1.0, 1.0));
        assert_eq!(records[0].sort_key, SortKey::Number(0.0));
    }

    #[test]
    fn test_undeclared_required_field_fails() {
        let file = write_features(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},
                 "properties":{"UNIT_ID":"U1","NAME":"101"}}
            ]}"#,
        );
        let err = GeoJsonSource::new()
            .with_units(file.path())
            .read(Tier::Unit)
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingField { tier: Tier::Unit, .. }));
    }

    #[test]
    fn test_missing_geometry_fails() {
        let file = write_features(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,
                 "properties":{"FACILITY_ID":"F1","NAME":"HQ"}}
            ]}"#,
        );
        let err = GeoJsonSource::new()
            .with_sites(file.path())
            .read(Tier::Site)
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidGeometry { index: 0, .. }));
    }

    #[test]
    fn test_unconfigured_tier_is_empty() {
        let source = GeoJsonSource::new();
        assert!(source.read(Tier::Unit).unwrap().is_empty());
        assert_eq!(source.describe(Tier::Unit), "unit features (none)");
    }

    #[test]
    fn test_number_text() {
        let integral: serde_json::Number = serde_json::from_str("3.0").unwrap();
        let fraction: serde_json::Number = serde_json::from_str("2.5").unwrap();
        let int: serde_json::Number = serde_json::from_str("12345").unwrap();
        assert_eq!(number_text(&integral), "3");
        assert_eq!(number_text(&fraction), "2.5");
        assert_eq!(number_text(&int), "12345");
    }
}
