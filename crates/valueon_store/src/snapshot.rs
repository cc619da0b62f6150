//! Snapshot documents: the saved envelope and the merge that restores a
//! saved document on top of the current defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use valueon_core::{default_inputs, AnalysisInputs};

use crate::error::{StoreError, StoreResult};

/// Envelope layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Entity lists merged per id instead of replaced wholesale.
const MERGED_BY_ID: [&str; 2] = ["unitTypes", "unitAllocations"];

/// A saved snapshot with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEnvelope {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub inputs: AnalysisInputs,
}

impl SnapshotEnvelope {
    pub fn new(inputs: AnalysisInputs) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            inputs,
        }
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Decode a stored document into a full snapshot.
///
/// Accepts an envelope or a bare inputs object. Whatever the document lacks
/// is filled in from [`default_inputs`].
pub fn decode_snapshot(content: &str) -> StoreResult<AnalysisInputs> {
    let document: Value = serde_json::from_str(content)?;

    let saved = match document {
        Value::Object(mut map) if map.get("inputs").map_or(false, Value::is_object) => {
            if let Some(version) = map.get("version").and_then(Value::as_u64) {
                if version > u64::from(SNAPSHOT_VERSION) {
                    warn!("Snapshot version {} is newer than {}", version, SNAPSHOT_VERSION);
                }
            }
            map.remove("inputs").unwrap_or(Value::Null)
        }
        other => other,
    };

    if !saved.is_object() {
        return Err(StoreError::InvalidSnapshot(
            "expected a JSON object".to_string(),
        ));
    }

    let defaults = serde_json::to_value(default_inputs())?;
    let merged = merge_with_defaults(defaults, saved);
    Ok(serde_json::from_value(merged)?)
}

/// Overlay a saved inputs object on the defaults.
///
/// Top-level keys of `saved` replace the defaults, except the entity lists in
/// [`MERGED_BY_ID`], which are merged with [`merge_entities`].
pub fn merge_with_defaults(defaults: Value, saved: Value) -> Value {
    let (Value::Object(mut merged), Value::Object(saved)) = (defaults, saved) else {
        return Value::Null;
    };

    for (key, value) in saved {
        let combined = match (merged.remove(&key), value) {
            (Some(Value::Array(base)), Value::Array(overlay)) if MERGED_BY_ID.contains(&key.as_str()) => {
                Value::Array(merge_entities(base, overlay))
            }
            (_, value) => value,
        };
        merged.insert(key, combined);
    }

    Value::Object(merged)
}

/// Merge two entity lists by their `id` field.
///
/// Each default entity gets the fields of its saved counterpart laid over it;
/// saved entities unknown to the defaults follow in saved order.
pub fn merge_entities(defaults: Vec<Value>, saved: Vec<Value>) -> Vec<Value> {
    let id_of = |value: &Value| value.get("id").and_then(Value::as_str).map(str::to_string);

    let mut overlay: Vec<Option<Value>> = saved.into_iter().map(Some).collect();
    let mut merged = Vec::with_capacity(defaults.len() + overlay.len());

    for base in defaults {
        let matching = id_of(&base).and_then(|id| {
            overlay
                .iter()
                .position(|o| o.as_ref().and_then(id_of).as_deref() == Some(id.as_str()))
        });
        match matching.and_then(|i| overlay[i].take()) {
            Some(saved) => merged.push(shallow_merge(base, saved)),
            None => merged.push(base),
        }
    }

    merged.extend(overlay.into_iter().flatten().filter(|v| id_of(v).is_some()));
    merged
}

fn shallow_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

/// Build an envelope value for an arbitrary inputs object. Used by tests and
/// tools that write documents by hand.
pub fn envelope_value(inputs: Value) -> Value {
    let mut map = Map::new();
    map.insert("version".to_string(), Value::from(SNAPSHOT_VERSION));
    map.insert("savedAt".to_string(), Value::from(Utc::now().to_rfc3339()));
    map.insert("inputs".to_string(), inputs);
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_round_trip() {
        let mut inputs = default_inputs();
        inputs.initial_payment = 1.0;
        let json = SnapshotEnvelope::new(inputs.clone()).to_json().unwrap();
        assert!(json.contains("savedAt"));
        assert_eq!(decode_snapshot(&json).unwrap(), inputs);
    }

    #[test]
    fn test_bare_inputs_are_accepted() {
        let content = json!({"isAdvancedMode": true}).to_string();
        let inputs = decode_snapshot(&content).unwrap();
        assert!(inputs.is_advanced_mode);
        assert_eq!(inputs.advanced_categories, default_inputs().advanced_categories);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(matches!(decode_snapshot("[1, 2]"), Err(StoreError::InvalidSnapshot(_))));
        assert!(matches!(decode_snapshot("{oops"), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_entities_merge_by_id() {
        let defaults = vec![
            json!({"id": "u1", "name": "59 Type", "supplyArea": 25}),
            json!({"id": "u2", "name": "84 Type", "supplyArea": 34}),
        ];
        let saved = vec![
            json!({"id": "u3", "name": "Penthouse", "supplyArea": 60}),
            json!({"id": "u2", "totalUnits": 154}),
        ];
        let merged = merge_entities(defaults, saved);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0]["name"], "59 Type");
        assert_eq!(merged[1]["name"], "84 Type");
        assert_eq!(merged[1]["totalUnits"], 154);
        assert_eq!(merged[2]["id"], "u3");
    }

    #[test]
    fn test_top_level_keys_replace_defaults() {
        let saved = json!({
            "advancedCategories": [],
            "unitAllocations": [{"id": "a1", "count": 7}]
        });
        let inputs = decode_snapshot(&envelope_value(saved).to_string()).unwrap();

        assert!(inputs.advanced_categories.is_empty());
        assert_eq!(inputs.unit_allocations.len(), 6);
        let a1 = inputs.allocation("a1").unwrap();
        assert_eq!(a1.count, 7);
        assert_eq!(a1.unit_type_id, "u1");
        assert_eq!(inputs.project_target, default_inputs().project_target);
    }
}
