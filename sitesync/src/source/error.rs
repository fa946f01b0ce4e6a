//! Error types for spatial sources.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::Tier;

/// Result type for spatial source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while reading spatial records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read a feature file.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Feature file is not a valid GeoJSON FeatureCollection.
    #[error("failed to parse {}: {reason}", .path.display())]
    ParseFailed { path: PathBuf, reason: String },

    /// A declared field is not present in the tier's features.
    #[error("{tier} features have no field '{field}'")]
    MissingField { tier: Tier, field: String },

    /// A field holds a value that cannot be used as text.
    #[error("{tier} field '{field}' has unsupported value: {value}")]
    InvalidValue {
        tier: Tier,
        field: String,
        value: String,
    },

    /// A feature has no usable geometry.
    #[error("{tier} feature {index} has no usable geometry: {reason}")]
    InvalidGeometry {
        tier: Tier,
        index: usize,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = SourceError::MissingField {
            tier: Tier::Level,
            field: "FACILITY_ID".to_string(),
        };
        assert_eq!(err.to_string(), "level features have no field 'FACILITY_ID'");
    }
}
