//! Spatial feature sources.
//!
//! A [`SpatialSource`] supplies the features of one tier at a time. The
//! reconciliation core only sees [`SpatialRecord`] values; how they are stored
//! (GeoJSON files, memory) is up to the implementation.
//!
//! # Example
//!
//! ```ignore
//! use sitesync::source::{GeoJsonSource, SpatialSource, Tier};
//!
//! let source = GeoJsonSource::new()
//!     .with_sites("facilities.geojson")
//!     .with_levels("levels.geojson")
//!     .with_units("units.geojson");
//! let sites = source.read(Tier::Site)?;
//! ```

mod error;
mod geojson;
mod memory;
mod schema;
mod types;

pub use error::{SourceError, SourceResult};
pub use geojson::GeoJsonSource;
pub use memory::MemorySource;
pub use schema::{LevelFields, SiteFields, TierSchema, UnitFields};
pub use types::{
    sort_records, Address, Coordinates, RecordKind, SortKey, SpatialRecord, Tier,
};

/// Supplier of spatial records, one tier at a time.
pub trait SpatialSource {
    /// Reads every record of `tier` in source order.
    fn read(&self, tier: Tier) -> SourceResult<Vec<SpatialRecord>>;

    /// Human-readable description of where `tier` comes from.
    fn describe(&self, tier: Tier) -> String;
}
