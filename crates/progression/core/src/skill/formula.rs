//! Leveling curve.
//!
//! `required(level) = base_xp * level^exponent`
//!
//! The curve is evaluated in `f64`. For the default parameters (100, 1.5) the
//! requirement stays finite for every `u32` level (about 2.8e16 at
//! `u32::MAX`), and it remains finite for any exponent up to roughly 30.

use crate::config::ConfigError;

/// Pure function from a level to the experience needed to advance past it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelFormula {
    base_xp: f64,
    exponent: f64,
}

impl LevelFormula {
    pub const DEFAULT_BASE_XP: f64 = 100.0;
    pub const DEFAULT_EXPONENT: f64 = 1.5;

    /// Create a formula, rejecting non-positive or non-finite parameters.
    pub fn new(base_xp: f64, exponent: f64) -> Result<Self, ConfigError> {
        if !(base_xp.is_finite() && base_xp > 0.0) {
            return Err(ConfigError::NonPositive {
                key: "leveling.base-xp",
                value: base_xp,
            });
        }
        if !(exponent.is_finite() && exponent > 0.0) {
            return Err(ConfigError::NonPositive {
                key: "leveling.exponent",
                value: exponent,
            });
        }
        Ok(Self { base_xp, exponent })
    }

    pub fn base_xp(&self) -> f64 {
        self.base_xp
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Experience required to advance past `level`. Levels below 1 require 0.
    #[inline]
    pub fn required_experience(&self, level: u32) -> f64 {
        if level < 1 {
            return 0.0;
        }
        self.base_xp * f64::from(level).powf(self.exponent)
    }

    /// Highest level reachable from `from` when `budget` experience is spent
    /// on consecutive requirements. Never overshoots: the requirements summed
    /// over `from..result` stay below the integral of the curve, which is
    /// what the estimate inverts. Saturates at `u32::MAX`.
    pub(crate) fn reachable_level(&self, from: u32, budget: f64) -> u32 {
        let power = self.exponent + 1.0;
        let start = f64::from(from).powf(power);
        let target = (budget / self.base_xp * power + start)
            .powf(power.recip())
            .floor();
        if !target.is_finite() || target >= f64::from(u32::MAX) {
            return u32::MAX;
        }
        (target as u32).max(from)
    }

    /// Estimated experience to climb from `from` to `to`, i.e. the sum of
    /// `required(level)` for `from <= level < to`.
    ///
    /// Integral of the curve with the trapezoid correction. Never exceeds the
    /// integral, so it is at most the budget [`Self::reachable_level`] was
    /// given.
    pub(crate) fn span_cost(&self, from: u32, to: u32) -> f64 {
        if to <= from {
            return 0.0;
        }
        let power = self.exponent + 1.0;
        let (a, b) = (f64::from(from), f64::from(to));
        let integral = (b.powf(power) - a.powf(power)) / power;
        let correction = (b.powf(self.exponent) - a.powf(self.exponent)) / 2.0;
        self.base_xp * (integral - correction).max(0.0)
    }
}

impl Default for LevelFormula {
    fn default() -> Self {
        Self {
            base_xp: Self::DEFAULT_BASE_XP,
            exponent: Self::DEFAULT_EXPONENT,
        }
    }
}
