//! Deterministic progression rules shared by the runtime and operator tools.
//!
//! `progression-core` defines the canonical skill model (kinds, leveling curve,
//! per-player profiles), the stimulus-to-experience lookup tables, and the
//! level-derived bonus formulas. Everything here is pure: persistence, caching
//! and logging live in the `runtime` crate, which depends on the types
//! re-exported below.
//!
//! External inputs reach the rules through two seams in [`env`]:
//! - [`ConfigOracle`] supplies multipliers, curve parameters and bonus rates
//! - [`RandomSource`] supplies the uniform draws behind chance-based bonuses
pub mod bonus;
pub mod config;
pub mod env;
pub mod experience;
pub mod skill;

pub use bonus::{BonusKind, BonusManager};
pub use config::{ConfigError, SkillsConfig};
pub use env::{ConfigOracle, PcgRandom, RandomSource};
pub use experience::{EntityKind, ExperienceCalculator, ItemStack, Material, TradeOffer};
pub use skill::{ExperienceResult, LevelFormula, PlayerId, Skill, SkillKind, SkillProfile};
