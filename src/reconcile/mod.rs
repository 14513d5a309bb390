// Reconciliation — guarded merge and field diff for Central member records.
//
// Only eight fields are ever read, written or compared:
//
//   root:   hidden, name, description, offlineNotifyDelay
//   config: authorized, capabilities, tags, ipAssignments, noAutoAssignIps
//
// Everything else in a member record passes through untouched.
//
// The merge is existence-gated: a desired value is written only when the
// field already exists at the same place in the fetched record. This keeps
// unknown fields out of the payload sent to Central, but it also means a
// field that Central has never populated for this member cannot be set.
// That limitation is kept as-is; see DESIGN.md.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::central::{DesiredConfig, MemberRecord};

/// Top-level member fields, in diff output order.
pub const ROOT_KEYS: [&str; 4] = ["hidden", "name", "description", "offlineNotifyDelay"];

/// Fields nested under `config`, in diff output order (after the root keys).
pub const CONFIG_KEYS: [&str; 5] = [
    "authorized",
    "capabilities",
    "tags",
    "ipAssignments",
    "noAutoAssignIps",
];

/// Where a recognized field lives inside a member record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    Root,
    Config,
}

/// All recognized fields in canonical order.
pub fn recognized_fields() -> impl Iterator<Item = (FieldScope, &'static str)> {
    ROOT_KEYS
        .iter()
        .map(|k| (FieldScope::Root, *k))
        .chain(CONFIG_KEYS.iter().map(|k| (FieldScope::Config, *k)))
}

pub fn is_recognized(key: &str) -> bool {
    ROOT_KEYS.contains(&key) || CONFIG_KEYS.contains(&key)
}

fn lookup<'a>(record: &'a MemberRecord, scope: FieldScope, key: &str) -> Option<&'a Value> {
    match scope {
        FieldScope::Root => record.get(key),
        FieldScope::Config => record.config().and_then(|c| c.get(key)),
    }
}

/// Overwrite recognized fields of `record` from `desired`.
///
/// A field is written only if it is present in `desired` AND already present
/// in `record` (at the root for root keys, inside `config` for config keys).
/// Unrecognized keys in `desired` are ignored. The result never has a key
/// the input did not have.
pub fn apply_desired_fields(record: &MemberRecord, desired: &DesiredConfig) -> MemberRecord {
    let mut merged = record.clone();

    for key in ROOT_KEYS {
        if let Some(value) = desired.get(key) {
            if let Some(slot) = merged.root_mut().get_mut(key) {
                debug!("Setting root key {} to {}", key, value);
                *slot = value.clone();
            }
        }
    }

    if let Some(config) = merged.config_mut() {
        for key in CONFIG_KEYS {
            if let Some(value) = desired.get(key) {
                if let Some(slot) = config.get_mut(key) {
                    debug!("Setting config key {} to {}", key, value);
                    *slot = value.clone();
                }
            }
        }
    }

    merged
}

/// Before/after values of the recognized fields that differ.
///
/// `old` and `new` always carry the same keys, in canonical field order. A
/// field missing from one side is reported as `null` on that side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeSet {
    pub old: Map<String, Value>,
    pub new: Map<String, Value>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.old.is_empty() && self.new.is_empty()
    }

    pub fn len(&self) -> usize {
        self.old.len()
    }

    /// Changed field names, in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.old.keys().map(String::as_str)
    }

    /// `None` when nothing changed.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// Compare the recognized fields of two records.
///
/// Equality is structural; a missing field differs from any present value,
/// `null` included.
pub fn diff(old: &MemberRecord, new: &MemberRecord) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (scope, key) in recognized_fields() {
        let before = lookup(old, scope, key);
        let after = lookup(new, scope, key);
        if before != after {
            changes
                .old
                .insert(key.to_string(), before.cloned().unwrap_or(Value::Null));
            changes
                .new
                .insert(key.to_string(), after.cloned().unwrap_or(Value::Null));
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> MemberRecord {
        MemberRecord::from_value(value).unwrap()
    }

    fn desired(value: Value) -> DesiredConfig {
        DesiredConfig::from_value(value).unwrap()
    }

    fn full_record() -> MemberRecord {
        record(json!({
            "id": "8056c2e21c000001-deadbeef01",
            "hidden": false,
            "name": "laptop",
            "description": "",
            "offlineNotifyDelay": 0,
            "lastOnline": 1700000000000u64,
            "config": {
                "authorized": false,
                "capabilities": [],
                "tags": [[1, 2]],
                "ipAssignments": ["10.0.0.5"],
                "noAutoAssignIps": false,
                "activeBridge": false
            }
        }))
    }

    fn sample_value(key: &str) -> Value {
        match key {
            "hidden" | "authorized" | "noAutoAssignIps" => json!(true),
            "name" => json!("renamed"),
            "description" => json!("a long description"),
            "offlineNotifyDelay" => json!(60000),
            "capabilities" => json!([7]),
            "tags" => json!([[1, 3]]),
            "ipAssignments" => json!(["10.0.0.9"]),
            _ => unreachable!("not a recognized key: {}", key),
        }
    }

    #[test]
    fn test_recognized_fields_order() {
        let keys: Vec<&str> = recognized_fields().map(|(_, k)| k).collect();
        assert_eq!(
            keys,
            vec![
                "hidden",
                "name",
                "description",
                "offlineNotifyDelay",
                "authorized",
                "capabilities",
                "tags",
                "ipAssignments",
                "noAutoAssignIps"
            ]
        );
        assert!(is_recognized("tags"));
        assert!(!is_recognized("activeBridge"));
    }

    #[test]
    fn test_apply_scenario_name_and_authorized() {
        let original = record(json!({
            "hidden": false,
            "name": "a",
            "config": {"authorized": false}
        }));
        let merged = apply_desired_fields(&original, &desired(json!({"name": "b", "authorized": true})));

        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!({"hidden": false, "name": "b", "config": {"authorized": true}})
        );

        let changes = diff(&original, &merged);
        assert_eq!(changes.old, *json!({"name": "a", "authorized": false}).as_object().unwrap());
        assert_eq!(changes.new, *json!({"name": "b", "authorized": true}).as_object().unwrap());
    }

    #[test]
    fn test_apply_skips_fields_missing_from_record() {
        let original = record(json!({"name": "a", "config": {"authorized": false}}));
        let merged = apply_desired_fields(
            &original,
            &desired(json!({"description": "never set", "tags": [[1, 1]]})),
        );
        assert_eq!(merged, original);
        assert!(diff(&original, &merged).is_empty());
    }

    #[test]
    fn test_apply_skips_config_keys_without_config_object() {
        let original = record(json!({"name": "a", "authorized": false}));
        let merged = apply_desired_fields(&original, &desired(json!({"authorized": true})));
        // `authorized` is a config key; a stray root-level copy is not touched.
        assert_eq!(merged.get("authorized"), Some(&json!(false)));
    }

    #[test]
    fn test_apply_does_not_cross_scopes() {
        let original = record(json!({
            "name": "a",
            "config": {"name": "inner", "authorized": false}
        }));
        let merged = apply_desired_fields(&original, &desired(json!({"name": "b"})));
        assert_eq!(merged.get("name"), Some(&json!("b")));
        assert_eq!(merged.config().unwrap().get("name"), Some(&json!("inner")));
    }

    #[test]
    fn test_apply_ignores_unrecognized_keys() {
        let original = full_record();
        let merged = apply_desired_fields(
            &original,
            &desired(json!({"lastOnline": 0, "activeBridge": true, "id": "other"})),
        );
        assert_eq!(merged, original);
    }

    #[test]
    fn test_apply_never_adds_keys() {
        let sparse = record(json!({"hidden": true, "config": {"tags": []}}));
        let mut everything = DesiredConfig::new();
        for (_, key) in recognized_fields() {
            everything.insert(key, sample_value(key));
        }
        everything.insert("unknown", json!(1));

        for original in [sparse, full_record(), MemberRecord::new()] {
            let merged = apply_desired_fields(&original, &everything);
            let before: Vec<&String> = original.as_map().keys().collect();
            let after: Vec<&String> = merged.as_map().keys().collect();
            assert_eq!(before, after);

            let before_cfg: Option<Vec<&String>> = original.config().map(|c| c.keys().collect());
            let after_cfg: Option<Vec<&String>> = merged.config().map(|c| c.keys().collect());
            assert_eq!(before_cfg, after_cfg);
        }
    }

    #[test]
    fn test_apply_null_value_is_written() {
        let original = record(json!({"description": "x"}));
        let merged = apply_desired_fields(&original, &desired(json!({"description": null})));
        assert_eq!(merged.get("description"), Some(&Value::Null));
    }

    #[test]
    fn test_diff_identical_records_is_empty() {
        for r in [full_record(), MemberRecord::new(), record(json!({"config": {}}))] {
            let changes = diff(&r, &r);
            assert!(changes.is_empty());
            assert!(changes.into_option().is_none());
        }
    }

    #[test]
    fn test_diff_single_field_change_reports_only_that_field() {
        let base = full_record();
        for (_, key) in recognized_fields() {
            let mut everything = DesiredConfig::new();
            everything.insert(key, sample_value(key));
            let changed = apply_desired_fields(&base, &everything);

            let changes = diff(&base, &changed);
            let keys: Vec<&str> = changes.keys().collect();
            assert_eq!(keys, vec![key], "field {}", key);
            assert_eq!(changes.new.get(key), Some(&sample_value(key)));
        }
    }

    #[test]
    fn test_diff_missing_differs_from_null() {
        let old = record(json!({"description": null}));
        let new = record(json!({}));
        let changes = diff(&old, &new);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.old.get("description"), Some(&Value::Null));
        assert_eq!(changes.new.get("description"), Some(&Value::Null));
    }

    #[test]
    fn test_diff_detects_added_and_removed_fields() {
        let old = record(json!({"name": "a", "config": {"authorized": true}}));
        let new = record(json!({"name": "a", "hidden": true}));
        let changes = diff(&old, &new);
        let keys: Vec<&str> = changes.keys().collect();
        assert_eq!(keys, vec!["hidden", "authorized"]);
        assert_eq!(changes.old.get("hidden"), Some(&Value::Null));
        assert_eq!(changes.new.get("authorized"), Some(&Value::Null));
    }

    #[test]
    fn test_diff_compares_nested_values_structurally() {
        let old = record(json!({"config": {"tags": [[1, 2], [3, 4]]}}));
        let same = record(json!({"config": {"tags": [[1, 2], [3, 4]]}}));
        let reordered = record(json!({"config": {"tags": [[3, 4], [1, 2]]}}));
        assert!(diff(&old, &same).is_empty());
        assert_eq!(diff(&old, &reordered).keys().collect::<Vec<_>>(), vec!["tags"]);
    }

    #[test]
    fn test_diff_ignores_unrecognized_fields() {
        let old = record(json!({"lastOnline": 1, "config": {"revision": 4}}));
        let new = record(json!({"lastOnline": 2, "config": {"revision": 5}}));
        assert!(diff(&old, &new).is_empty());
    }

    #[test]
    fn test_diff_output_is_canonically_ordered() {
        let old = record(json!({
            "config": {"noAutoAssignIps": false, "authorized": false},
            "offlineNotifyDelay": 0,
            "hidden": false
        }));
        let new = record(json!({
            "hidden": true,
            "offlineNotifyDelay": 10,
            "config": {"authorized": true, "noAutoAssignIps": true}
        }));
        let changes = diff(&old, &new);
        let old_keys: Vec<&String> = changes.old.keys().collect();
        let new_keys: Vec<&String> = changes.new.keys().collect();
        assert_eq!(
            old_keys,
            vec!["hidden", "offlineNotifyDelay", "authorized", "noAutoAssignIps"]
        );
        assert_eq!(old_keys, new_keys);
    }
}
