//! Version migration on the raw JSON value.
//!
//! Each step lifts a document from version `n` to `n + 1`; a document without
//! a `version` field is version 0 (the browser format).

use crate::schema::SAVE_VERSION;
use crate::PersistenceError;
use serde_json::{json, Map, Value};
use tracing::info;

type Step = fn(&mut Map<String, Value>) -> Result<(), String>;

/// Steps indexed by source version.
const STEPS: [Step; SAVE_VERSION as usize] = [v0_to_v1];

/// Version recorded in a document (0 when absent).
pub fn version_of(doc: &Value) -> u32 {
    doc.get("version")
        .and_then(Value::as_u64)
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX))
}

/// Bring a document up to [`SAVE_VERSION`].
pub fn migrate(mut doc: Value) -> Result<Value, PersistenceError> {
    let from = version_of(&doc);
    if from > SAVE_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: from,
            supported: SAVE_VERSION,
        });
    }
    let obj = doc.as_object_mut().ok_or(PersistenceError::NotAnObject)?;
    for version in from..SAVE_VERSION {
        STEPS[version as usize](obj).map_err(|reason| PersistenceError::Migration {
            from: version,
            reason,
        })?;
        obj.insert("version".into(), json!(version + 1));
        info!(from = version, to = version + 1, "migrated save");
    }
    Ok(doc)
}

/// Browser saves kept unlocked achievements as a bare id list.
fn v0_to_v1(obj: &mut Map<String, Value>) -> Result<(), String> {
    let Some(legacy) = obj.remove("unlockedAchievements") else {
        return Ok(());
    };
    let ids = match legacy {
        Value::Array(ids) => ids,
        Value::Null => return Ok(()),
        other => return Err(format!("unlockedAchievements is not a list: {other}")),
    };
    let entries = obj
        .entry("achievements")
        .or_insert_with(|| Value::Array(Vec::new()));
    if entries.is_null() {
        *entries = Value::Array(Vec::new());
    }
    let Value::Array(entries) = entries else {
        return Err("achievements is not a list".into());
    };
    for id in ids {
        let Value::String(id) = id else {
            return Err("achievement id is not a string".into());
        };
        let known = entries
            .iter()
            .position(|e| e.get("id").and_then(Value::as_str) == Some(id.as_str()));
        match known.and_then(|i| entries[i].as_object_mut()) {
            Some(entry) => {
                entry.insert("unlocked".into(), Value::Bool(true));
            }
            None => entries.push(json!({ "id": id, "unlocked": true })),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_achievement_list_becomes_entries() {
        let doc = json!({
            "unlockedAchievements": ["first_energy", "click_master"],
            "achievements": [{ "id": "first_energy", "unlocked": false, "progress": 1 }]
        });
        let out = migrate(doc).unwrap();
        assert_eq!(out["version"], json!(1));
        assert!(out.get("unlockedAchievements").is_none());
        let list = out["achievements"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["unlocked"], json!(true));
        assert_eq!(list[1]["id"], json!("click_master"));
    }

    #[test]
    fn current_version_is_untouched() {
        let doc = json!({ "version": 1, "totalClicks": 5 });
        assert_eq!(migrate(doc.clone()).unwrap(), doc);
    }

    #[test]
    fn newer_version_is_rejected() {
        let err = migrate(json!({ "version": 99 })).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn malformed_legacy_list_is_a_migration_error() {
        let err = migrate(json!({ "unlockedAchievements": 3 })).unwrap_err();
        assert!(matches!(err, PersistenceError::Migration { from: 0, .. }));
        assert!(matches!(
            migrate(json!([1, 2])).unwrap_err(),
            PersistenceError::NotAnObject
        ));
    }
}
