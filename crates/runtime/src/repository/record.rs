//! Persisted profile record.
//!
//! ```json
//! {
//!   "playerId": "2f1c…",
//!   "skills": { "MINING": { "level": 3, "experience": 41.5 }, … },
//!   "lastUpdated": 1718000000000
//! }
//! ```
//!
//! Writing goes through serde. Reading is deliberately lenient and walks a
//! [`serde_json::Value`]: a bad skill entry falls back to a fresh skill and
//! out-of-range numbers are clamped, so one corrupt field never costs the
//! player the whole record.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, TimeZone, Utc};
use progression_core::{LevelFormula, PlayerId, Skill, SkillKind, SkillProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{RepositoryError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub level: u32,
    pub experience: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub player_id: PlayerId,
    pub skills: BTreeMap<SkillKind, SkillRecord>,
    /// Milliseconds since the Unix epoch.
    pub last_updated: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayed_skill: Option<SkillKind>,
}

impl ProfileRecord {
    /// Snapshot a profile, stamped with the current time.
    pub fn from_profile(profile: &SkillProfile) -> Self {
        let skills = profile
            .skills()
            .map(|skill| {
                (
                    skill.kind(),
                    SkillRecord {
                        level: skill.level(),
                        experience: skill.experience(),
                    },
                )
            })
            .collect();
        Self {
            player_id: profile.player_id(),
            skills,
            last_updated: Utc::now().timestamp_millis(),
            displayed_skill: profile.displayed_skill(),
        }
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.last_updated).single()
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    /// Rebuild the profile of `expected` from raw record bytes.
    ///
    /// Fails on unparsable JSON, a missing or foreign `playerId`, or a
    /// missing `skills` object. Everything below that level is repaired.
    pub fn decode(bytes: &[u8], expected: &PlayerId, formula: LevelFormula) -> Result<SkillProfile> {
        let root: Value = serde_json::from_slice(bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let found = root
            .get("playerId")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<PlayerId>().ok())
            .ok_or_else(|| RepositoryError::CorruptedData("invalid or missing playerId".into()))?;
        if found != *expected {
            return Err(RepositoryError::PlayerMismatch {
                expected: *expected,
                found,
            });
        }

        let entries = root
            .get("skills")
            .and_then(Value::as_object)
            .ok_or_else(|| RepositoryError::CorruptedData("missing skills object".into()))?;

        let mut skills = HashMap::with_capacity(SkillKind::COUNT);
        for kind in SkillKind::ALL {
            let skill = entries
                .get(kind.key())
                .and_then(|entry| restore_skill(kind, entry, formula))
                .unwrap_or_else(|| Skill::new(kind, formula));
            skills.insert(kind, skill);
        }

        let mut profile = SkillProfile::with_skills(found, skills);
        profile.set_displayed_skill(
            root.get("displayedSkill")
                .and_then(Value::as_str)
                .and_then(|raw| raw.parse().ok()),
        );
        Ok(profile)
    }
}

fn restore_skill(kind: SkillKind, entry: &Value, formula: LevelFormula) -> Option<Skill> {
    let level = entry.get("level")?;
    let level = level
        .as_i64()
        .or_else(|| level.as_f64().map(|value| value as i64))?;
    let experience = entry.get("experience")?.as_f64()?;

    let level = level.clamp(1, i64::from(u32::MAX)) as u32;
    Some(Skill::restored(kind, level, experience, formula))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn formula() -> LevelFormula {
        LevelFormula::default()
    }

    fn decode(value: Value, player: &PlayerId) -> Result<SkillProfile> {
        ProfileRecord::decode(&serde_json::to_vec(&value).unwrap(), player, formula())
    }

    #[test]
    fn encodes_uppercase_skill_keys_and_camel_case_fields() {
        let player = PlayerId::new_random();
        let mut profile = SkillProfile::new(player, formula());
        profile
            .get_skill_mut(SkillKind::Mining)
            .unwrap()
            .add_experience(150.0);

        let bytes = ProfileRecord::from_profile(&profile).encode().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["playerId"], json!(player.to_string()));
        assert_eq!(value["skills"]["MINING"]["level"], json!(2));
        assert_eq!(value["skills"]["MINING"]["experience"], json!(50.0));
        assert_eq!(value["skills"].as_object().unwrap().len(), SkillKind::COUNT);
        assert!(value["lastUpdated"].as_i64().unwrap() > 0);
        assert!(value.get("displayedSkill").is_none());
    }

    #[test]
    fn decodes_what_it_encodes() {
        let player = PlayerId::new_random();
        let mut profile = SkillProfile::new(player, formula());
        profile
            .get_skill_mut(SkillKind::Trading)
            .unwrap()
            .add_experience(12_345.5);
        profile.set_displayed_skill(Some(SkillKind::Trading));

        let record = ProfileRecord::from_profile(&profile);
        assert!(record.last_updated().is_some());
        let restored = ProfileRecord::decode(&record.encode().unwrap(), &player, formula()).unwrap();

        assert!(!restored.is_new());
        assert_eq!(restored.displayed_skill(), Some(SkillKind::Trading));
        for kind in SkillKind::ALL {
            let before = profile.get_skill(kind).unwrap();
            let after = restored.get_skill(kind).unwrap();
            assert_eq!(before.level(), after.level());
            assert_eq!(before.experience(), after.experience());
        }
    }

    #[test]
    fn clamps_corrupt_fields_and_fills_missing_skills() {
        let player = PlayerId::new_random();
        let profile = decode(
            json!({
                "playerId": player.to_string(),
                "skills": {
                    "MINING": { "level": -4, "experience": -10.0 },
                    "COMBAT": { "level": 7, "experience": 33.0 },
                    "FISHING": { "level": "high", "experience": 1.0 },
                    "ALCHEMY": { "level": 99, "experience": 0.0 }
                },
                "lastUpdated": 0
            }),
            &player,
        )
        .unwrap();

        let mining = profile.get_skill(SkillKind::Mining).unwrap();
        assert_eq!((mining.level(), mining.experience()), (1, 0.0));

        let combat = profile.get_skill(SkillKind::Combat).unwrap();
        assert_eq!((combat.level(), combat.experience()), (7, 33.0));

        let fishing = profile.get_skill(SkillKind::Fishing).unwrap();
        assert_eq!((fishing.level(), fishing.experience()), (1, 0.0));

        assert!(profile.has_all_skills());
    }

    #[test]
    fn rejects_foreign_player_id() {
        let player = PlayerId::new_random();
        let other = PlayerId::new_random();
        let err = decode(json!({ "playerId": other.to_string(), "skills": {} }), &player).unwrap_err();
        assert!(matches!(err, RepositoryError::PlayerMismatch { found, .. } if found == other));
    }

    #[test]
    fn rejects_missing_skills_and_garbage() {
        let player = PlayerId::new_random();
        assert!(matches!(
            decode(json!({ "playerId": player.to_string() }), &player),
            Err(RepositoryError::CorruptedData(_))
        ));
        assert!(matches!(
            decode(json!({ "skills": {} }), &player),
            Err(RepositoryError::CorruptedData(_))
        ));
        assert!(matches!(
            ProfileRecord::decode(b"{ not json", &player, formula()),
            Err(RepositoryError::Serialization(_))
        ));
    }
}
