//! Hierarchy state shared across tiers.
//!
//! - [`LookupIndex`]: id-to-name maps built once before tier processing
//! - [`PathBuilder`]: canonical full and parent paths for a record
//! - [`AddressCache`]: site addresses inherited by levels and units

mod address;
mod lookup;
mod path;

pub use address::{AddressCache, AddressRecord};
pub use lookup::LookupIndex;
pub use path::{join_segments, PathBuilder, RecordPath, DEFAULT_DELIMITER};
