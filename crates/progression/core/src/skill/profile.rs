use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::{LevelFormula, Skill, SkillKind};

/// Opaque player identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for PlayerId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// One player's skills, exactly one [`Skill`] per [`SkillKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct SkillProfile {
    player_id: PlayerId,
    skills: HashMap<SkillKind, Skill>,
    is_new: bool,
    displayed_skill: Option<SkillKind>,
}

impl SkillProfile {
    /// Fresh profile for a first-time player: every skill at level 1.
    pub fn new(player_id: PlayerId, formula: LevelFormula) -> Self {
        let skills = SkillKind::ALL
            .iter()
            .map(|&kind| (kind, Skill::new(kind, formula)))
            .collect();
        Self {
            player_id,
            skills,
            is_new: true,
            displayed_skill: None,
        }
    }

    /// Profile rebuilt from storage. The map is taken as-is; the loader is
    /// responsible for filling any kind the record did not contain.
    pub fn with_skills(player_id: PlayerId, skills: HashMap<SkillKind, Skill>) -> Self {
        Self {
            player_id,
            skills,
            is_new: false,
            displayed_skill: None,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn get_skill(&self, kind: SkillKind) -> Option<&Skill> {
        self.skills.get(&kind)
    }

    pub fn get_skill_mut(&mut self, kind: SkillKind) -> Option<&mut Skill> {
        self.skills.get_mut(&kind)
    }

    /// Skills in [`SkillKind::ALL`] order.
    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        SkillKind::ALL.iter().filter_map(|kind| self.skills.get(kind))
    }

    /// Insert or replace the skill of the same kind.
    pub fn add_skill(&mut self, skill: Skill) {
        self.skills.insert(skill.kind(), skill);
    }

    pub fn has_all_skills(&self) -> bool {
        SkillKind::ALL.iter().all(|kind| self.skills.contains_key(kind))
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn mark_as_existing(&mut self) {
        self.is_new = false;
    }

    pub fn displayed_skill(&self) -> Option<SkillKind> {
        self.displayed_skill
    }

    pub fn set_displayed_skill(&mut self, kind: Option<SkillKind>) {
        self.displayed_skill = kind;
    }

    /// Sum of all skill levels.
    pub fn total_level(&self) -> u64 {
        self.skills.values().map(|skill| u64::from(skill.level())).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_has_every_kind() {
        let profile = SkillProfile::new(PlayerId::new_random(), LevelFormula::default());
        assert!(profile.is_new());
        assert!(profile.has_all_skills());
        assert_eq!(profile.skills().count(), SkillKind::COUNT);
        assert_eq!(profile.total_level(), SkillKind::COUNT as u64);
    }

    #[test]
    fn mutations_through_get_skill_mut_are_visible() {
        let mut profile = SkillProfile::new(PlayerId::new_random(), LevelFormula::default());
        profile
            .get_skill_mut(SkillKind::Combat)
            .unwrap()
            .add_experience(120.0);

        let combat = profile.get_skill(SkillKind::Combat).unwrap();
        assert_eq!(combat.level(), 2);
        assert_eq!(combat.experience(), 20.0);
    }

    #[test]
    fn add_skill_replaces_same_kind() {
        let formula = LevelFormula::default();
        let mut profile = SkillProfile::with_skills(PlayerId::new_random(), HashMap::new());
        assert!(!profile.is_new());
        assert!(profile.get_skill(SkillKind::Mining).is_none());

        profile.add_skill(Skill::new(SkillKind::Mining, formula));
        profile.add_skill(Skill::restored(SkillKind::Mining, 9, 3.0, formula));

        assert_eq!(profile.skills().count(), 1);
        assert_eq!(profile.get_skill(SkillKind::Mining).unwrap().level(), 9);
        assert!(!profile.has_all_skills());
    }

    #[test]
    fn display_preference_and_new_flag() {
        let mut profile = SkillProfile::new(PlayerId::new_random(), LevelFormula::default());
        assert_eq!(profile.displayed_skill(), None);

        profile.set_displayed_skill(Some(SkillKind::Fishing));
        profile.mark_as_existing();

        assert_eq!(profile.displayed_skill(), Some(SkillKind::Fishing));
        assert!(!profile.is_new());
    }

    #[test]
    fn player_id_round_trips_through_text() {
        let id = PlayerId::new_random();
        let parsed: PlayerId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<PlayerId>().is_err());
    }
}
