//! Stimulus types and the stimulus-to-experience calculator.
mod calculator;
mod entity;
mod material;
pub mod tables;

pub use calculator::ExperienceCalculator;
pub use entity::EntityKind;
pub use material::{ItemStack, Material, TradeOffer};
