use super::SkillKind;

/// Outcome of one experience award. Returned to the caller, never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExperienceResult {
    pub skill_kind: SkillKind,
    pub experience_gained: f64,
    pub levels_gained: u32,
    pub leveled_up: bool,
}

impl ExperienceResult {
    pub fn new(skill_kind: SkillKind, experience_gained: f64, levels_gained: u32) -> Self {
        Self {
            skill_kind,
            experience_gained,
            levels_gained,
            leveled_up: levels_gained > 0,
        }
    }

    /// Result for an award that changed nothing.
    pub fn none(skill_kind: SkillKind) -> Self {
        Self::new(skill_kind, 0.0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.experience_gained <= 0.0
    }
}
