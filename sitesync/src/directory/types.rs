//! Wire types exchanged with the remote directory.

use serde::{Deserialize, Deserializer, Serialize};

use crate::source::{Address, Coordinates};

/// One node already present in the remote directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteNode {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_path: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub external_id: String,
}

impl RemoteNode {
    pub fn new(full_path: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            external_id: external_id.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response body of the node listing query.
#[derive(Debug, Deserialize)]
pub(crate) struct NodeListResponse {
    #[serde(default)]
    pub result: Vec<RemoteNode>,
}

/// Body sent to create or update a node.
///
/// Built fresh for every record. Optional fields are serialized only when
/// set, so a field present on one record never leaks into the next.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePayload {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub parent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_external_id: Option<String>,
}

impl NodePayload {
    /// Creates a payload with every optional field unset.
    pub fn new(name: impl Into<String>, parent: impl Into<String>, location: Coordinates) -> Self {
        Self {
            latitude: location.y,
            longitude: location.x,
            name: name.into(),
            parent: parent.into(),
            street: None,
            city: None,
            region: None,
            postal_code: None,
            country: None,
            level_external_id: None,
        }
    }

    /// Set all five address fields.
    pub fn with_address(mut self, address: &Address) -> Self {
        self.street = Some(address.street.clone());
        self.city = Some(address.city.clone());
        self.region = Some(address.region.clone());
        self.postal_code = Some(address.postal_code.clone());
        self.country = Some(address.country.clone());
        self
    }

    /// Set the external identifier of the level the node belongs to.
    pub fn with_level_external_id(mut self, level_id: impl Into<String>) -> Self {
        self.level_external_id = Some(level_id.into());
        self
    }

    /// The address carried by the payload, if any field is set.
    pub fn address(&self) -> Option<Address> {
        let fields = [
            &self.street,
            &self.city,
            &self.region,
            &self.postal_code,
            &self.country,
        ];
        if fields.iter().all(|f| f.is_none()) {
            return None;
        }
        let value = |f: &Option<String>| f.clone().unwrap_or_default();
        Some(Address::new(
            value(&self.street),
            value(&self.city),
            value(&self.region),
            value(&self.postal_code),
            value(&self.country),
        ))
    }
}
