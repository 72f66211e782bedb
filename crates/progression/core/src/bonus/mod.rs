//! Level-derived bonuses: drop chances, damage and cost modifiers.
mod kind;
mod manager;

pub use kind::BonusKind;
pub use manager::BonusManager;
