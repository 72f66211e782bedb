use super::{LevelFormula, SkillKind};

/// A single skill's level and carried-over experience.
///
/// After any [`Skill::add_experience`] call `experience < required_experience()`
/// holds unless the level saturated at `u32::MAX`. The administrative setters
/// only check their own domain and may leave the skill above its requirement;
/// the next positive award normalises it.
#[derive(Clone, Debug, PartialEq)]
pub struct Skill {
    kind: SkillKind,
    level: u32,
    experience: f64,
    formula: LevelFormula,
}

impl Skill {
    /// Fresh skill at level 1 with no experience.
    pub fn new(kind: SkillKind, formula: LevelFormula) -> Self {
        Self {
            kind,
            level: 1,
            experience: 0.0,
            formula,
        }
    }

    /// Rebuild a skill from stored values. Out-of-domain values are clamped
    /// to level 1 / zero experience.
    pub fn restored(kind: SkillKind, level: u32, experience: f64, formula: LevelFormula) -> Self {
        let experience = if experience.is_finite() && experience > 0.0 {
            experience
        } else {
            0.0
        };
        Self {
            kind,
            level: level.max(1),
            experience,
            formula,
        }
    }

    pub fn kind(&self) -> SkillKind {
        self.kind
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> f64 {
        self.experience
    }

    pub fn formula(&self) -> &LevelFormula {
        &self.formula
    }

    /// Experience needed to advance past the current level.
    pub fn required_experience(&self) -> f64 {
        self.formula.required_experience(self.level)
    }

    /// Add experience and process every level-up it pays for.
    ///
    /// Non-positive or non-finite amounts are ignored. Returns `true` if at
    /// least one level was gained.
    ///
    /// Level-ups are applied one at a time for the first few thousand
    /// levels; beyond that the curve's closed form skips ahead, so the cost
    /// of an award is bounded regardless of its size.
    pub fn add_experience(&mut self, amount: f64) -> bool {
        if !(amount.is_finite() && amount > 0.0) {
            return false;
        }

        let start = self.level;
        self.experience += amount;
        if !self.experience.is_finite() {
            self.experience = f64::MAX;
        }

        while !self.level_up_exact(Self::EXACT_STEPS) {
            self.skip_levels();
        }
        self.level > start
    }

    const EXACT_STEPS: u32 = 4096;

    /// Apply up to `steps` single level-ups. Returns `true` once settled.
    fn level_up_exact(&mut self, steps: u32) -> bool {
        for _ in 0..steps {
            if self.level == u32::MAX {
                return true;
            }
            let required = self.required_experience();
            if self.experience < required {
                return true;
            }
            self.experience -= required;
            self.level += 1;
        }
        self.level == u32::MAX || self.experience < self.required_experience()
    }

    fn skip_levels(&mut self) {
        let target = self.formula.reachable_level(self.level, self.experience);
        if target <= self.level {
            return;
        }
        let cost = self.formula.span_cost(self.level, target);
        self.experience = (self.experience - cost).max(0.0);
        self.level = target;
    }

    /// Set the level directly. Zero is ignored.
    pub fn set_level(&mut self, level: u32) {
        if level > 0 {
            self.level = level;
        }
    }

    /// Set experience directly. Negative and non-finite values are ignored.
    pub fn set_experience(&mut self, experience: f64) {
        if experience.is_finite() && experience >= 0.0 {
            self.experience = experience;
        }
    }
}
