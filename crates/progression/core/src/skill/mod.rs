//! Skill state: kinds, the leveling curve, single-skill state machine and the
//! per-player profile that owns one skill of every kind.
mod formula;
mod kind;
mod profile;
mod result;
mod state;

pub use formula::LevelFormula;
pub use kind::SkillKind;
pub use profile::{PlayerId, SkillProfile};
pub use result::ExperienceResult;
pub use state::Skill;
