//! JSON encoding of saves and the base64 export string.

use crate::migration::migrate;
use crate::schema::PersistedState;
use crate::PersistenceError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Parse a JSON save of any supported version.
pub fn decode_json(bytes: &[u8]) -> Result<PersistedState, PersistenceError> {
    let doc: serde_json::Value = serde_json::from_slice(bytes)?;
    let doc = migrate(doc)?;
    Ok(serde_json::from_value(doc)?)
}

/// Serialize a save as pretty JSON.
pub fn encode_json(state: &PersistedState) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec_pretty(state)?)
}

/// Opaque, reversible export string: base64 over compact JSON.
pub fn export_state(state: &PersistedState) -> Result<String, PersistenceError> {
    Ok(STANDARD.encode(serde_json::to_vec(state)?))
}

/// Decode an export string. Malformed input is reported, never partially applied.
pub fn import_state(encoded: &str) -> Result<PersistedState, PersistenceError> {
    let bytes = STANDARD.decode(encoded.trim())?;
    decode_json(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn export_import_preserves_state() {
        let mut state = PersistedState::default();
        state.prestige_count = 2;
        state.total_prestige_points = 12.0;
        state.reached_milestones.insert("energy_100".into());
        state.completed_research.insert("photovoltaics".into());
        let code = export_state(&state).unwrap();
        assert_eq!(import_state(&format!("  {code}\n")).unwrap(), state);
    }

    #[test]
    fn legacy_browser_save_imports() {
        let legacy = r#"{
            "resources": {
                "energy": {"amount": 1234.5, "totalEarned": 5000, "unlocked": true},
                "prestige": {"amount": 3, "totalEarned": 3, "unlocked": true, "perSecond": 0}
            },
            "upgrades": {"solar_panel": 4},
            "completedResearch": ["photovoltaics"],
            "prestigeUpgrades": [{"id": "production_boost", "level": 2}],
            "unlockedAchievements": ["first_energy"],
            "maxSpace": 15,
            "totalClicks": 321,
            "startTime": 1700000000000
        }"#;
        let code = STANDARD.encode(legacy);
        let state = import_state(&code).unwrap();
        assert_eq!(state.version, 1);
        assert_eq!(state.resource_amount("energy"), 1234.5);
        assert_eq!(state.upgrades.get("solar_panel"), Some(&4));
        assert_eq!(state.prestige_level("production_boost"), 2);
        assert_eq!(state.achievement_prestige_bonus, 1.0);
        assert!(state.achievements[0].unlocked);
        assert_eq!(state.total_clicks, 321);
        assert_eq!(state.start_time, 1_700_000_000_000);
        assert!(state.statistics.prestige_history.is_empty());
    }

    #[test]
    fn malformed_imports_are_rejected() {
        assert!(matches!(
            import_state("%%% not base64"),
            Err(PersistenceError::Encoding(_))
        ));
        let not_json = STANDARD.encode("hello");
        assert!(matches!(
            import_state(&not_json),
            Err(PersistenceError::Corrupt(_))
        ));
        let wrong_shape = STANDARD.encode(r#"{"totalClicks": "many"}"#);
        assert!(matches!(
            import_state(&wrong_shape),
            Err(PersistenceError::Corrupt(_))
        ));
    }

    proptest! {
        #[test]
        fn arbitrary_input_never_panics(s in ".{0,64}") {
            let _ = import_state(&s);
        }
    }
}
