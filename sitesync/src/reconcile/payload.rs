//! Assembly of the outgoing node payload.

use crate::directory::NodePayload;
use crate::hierarchy::{AddressCache, RecordPath};
use crate::source::{RecordKind, SpatialRecord};

use super::Resolution;

/// Builds a fresh payload for `record`.
///
/// Sites carry their own address. Levels and units inherit the address of
/// their resolved site when it is cached, and carry the id of their level.
pub fn build_payload(
    record: &SpatialRecord,
    path: &RecordPath,
    resolution: &Resolution,
    addresses: &AddressCache,
) -> NodePayload {
    let payload = NodePayload::new(
        record.name.clone(),
        resolution.parent.clone(),
        record.location,
    );

    match &record.kind {
        RecordKind::Site { address, .. } => payload.with_address(address),
        RecordKind::Level { level_id, .. } | RecordKind::Unit { level_id, .. } => {
            let payload = payload.with_level_external_id(level_id.clone());
            match addresses.lookup(&path.site_name) {
                Some(address) => payload.with_address(address),
                None => payload,
            }
        }
    }
}
