use serde::{Deserialize, Serialize};

/// A single typed attribute.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolyEntry {
    pub key: String,
    pub val: String,
    #[serde(rename = "valType")]
    pub val_type: String,
}

impl PolyEntry {
    pub fn new(key: impl Into<String>, val: impl Into<String>, val_type: impl Into<String>) -> Self {
        Self { key: key.into(), val: val.into(), val_type: val_type.into() }
    }
}

/// Create input: `{"data": [...]}`. The id is generated by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPolyObject {
    pub data: Vec<PolyEntry>,
}

/// Stored object, rendered as `{"id", "data"}` on reads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolyObject {
    pub id: String,
    pub data: Vec<PolyEntry>,
}

/// Create response: the posted entries come back under `values`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedPolyObject {
    pub id: String,
    pub values: Vec<PolyEntry>,
}

impl From<PolyObject> for CreatedPolyObject {
    fn from(obj: PolyObject) -> Self {
        Self { id: obj.id, values: obj.data }
    }
}
