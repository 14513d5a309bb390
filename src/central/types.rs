// Central API payloads
//
// Member records are kept as raw JSON objects: the reconciliation layer only
// ever touches a fixed set of fields, and everything else must round-trip to
// Central untouched. Presence matters, so absent and `null` stay distinct.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, ZeroTierError};

/// A network member as stored by Central.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberRecord(Map<String, Value>);

impl MemberRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an arbitrary JSON value; only objects are member records.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ZeroTierError::invalid_argument(format!(
                "member record must be a JSON object, got {}",
                other
            ))),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub(crate) fn root_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    /// The nested `config` object, if present and an object.
    pub fn config(&self) -> Option<&Map<String, Value>> {
        self.0.get("config").and_then(Value::as_object)
    }

    pub(crate) fn config_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0.get_mut("config").and_then(Value::as_object_mut)
    }
}

impl From<Map<String, Value>> for MemberRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Desired member settings: a flat mapping of field name to value, mixing
/// top-level keys (`name`, `hidden`, ...) and config keys (`authorized`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesiredConfig(Map<String, Value>);

impl DesiredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ZeroTierError::invalid_argument(format!(
                "member config must be a JSON object, got {}",
                other
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for DesiredConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
