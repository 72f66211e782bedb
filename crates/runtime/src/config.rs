//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use progression_core::{BonusKind, SkillKind, SkillsConfig};
use tracing::warn;

/// Bounded retry with doubling backoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 100;

    /// At least one attempt is always made.
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    /// Delay after the failed attempt with zero-based index `attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(Self::DEFAULT_INITIAL_BACKOFF_MS),
        )
    }
}

/// Everything needed to wire a [`crate::PlayerDataManager`] and its collaborators.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub skills: SkillsConfig,
    pub retry: RetryPolicy,
    /// `None` disables periodic saving.
    pub autosave_interval: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            skills: SkillsConfig::default(),
            retry: RetryPolicy::default(),
            autosave_interval: Some(Duration::from_secs(Self::DEFAULT_AUTOSAVE_SECS)),
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_AUTOSAVE_SECS: u64 = 300;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKILLS_DATA_DIR` - Directory for profile records (default: platform data dir)
    /// - `SKILLS_BASE_XP` - Experience required for level 1 (default: 100)
    /// - `SKILLS_EXPONENT` - Curve exponent (default: 1.5)
    /// - `SKILLS_BONUSES_ENABLED` - Global bonus switch (default: true)
    /// - `SKILLS_ENABLED` - Comma-separated list of enabled skills (default: all)
    /// - `SKILLS_XP_MULTIPLIER_<SKILL>` - Per-skill XP multiplier (default: 1.0)
    /// - `SKILLS_BONUS_<SKILL>` - Per-level rate of the skill's bonus
    /// - `SKILLS_SAVE_ATTEMPTS` - Save attempts before giving up (default: 3)
    /// - `SKILLS_SAVE_BACKOFF_MS` - First retry delay, doubled per retry (default: 100)
    /// - `SKILLS_AUTOSAVE_SECS` - Autosave period, 0 disables (default: 300)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary key lookup.
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("SKILLS_DATA_DIR").filter(|dir| !dir.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        config.skills = skills_from_lookup(&lookup);

        let attempts = match read_value::<u32, _>(&lookup, "SKILLS_SAVE_ATTEMPTS") {
            Some(0) => {
                warn!("Ignoring SKILLS_SAVE_ATTEMPTS=0: at least one attempt is required");
                RetryPolicy::DEFAULT_MAX_ATTEMPTS
            }
            Some(attempts) => attempts,
            None => RetryPolicy::DEFAULT_MAX_ATTEMPTS,
        };
        let backoff_ms = read_value::<u64, _>(&lookup, "SKILLS_SAVE_BACKOFF_MS")
            .unwrap_or(RetryPolicy::DEFAULT_INITIAL_BACKOFF_MS);
        config.retry = RetryPolicy::new(attempts, Duration::from_millis(backoff_ms));

        if let Some(secs) = read_value::<u64, _>(&lookup, "SKILLS_AUTOSAVE_SECS") {
            config.autosave_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }

        config
    }
}

fn skills_from_lookup<F>(lookup: &F) -> SkillsConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut skills = SkillsConfig::new();

    let defaults = skills.formula();
    let base_xp = read_value(lookup, "SKILLS_BASE_XP").unwrap_or(defaults.base_xp());
    let exponent = read_value(lookup, "SKILLS_EXPONENT").unwrap_or(defaults.exponent());
    skills = match skills.clone().with_formula(base_xp, exponent) {
        Ok(updated) => updated,
        Err(e) => {
            warn!("Ignoring leveling curve override: {}", e);
            skills
        }
    };

    if let Some(enabled) = read_flag(lookup, "SKILLS_BONUSES_ENABLED") {
        skills = skills.with_bonuses_enabled(enabled);
    }

    if let Some(list) = lookup("SKILLS_ENABLED") {
        let enabled = parse_skill_list(&list);
        for kind in SkillKind::ALL {
            skills = skills.with_skill_enabled(kind, enabled.contains(&kind));
        }
    }

    for kind in SkillKind::ALL {
        let key = format!("SKILLS_XP_MULTIPLIER_{}", kind.key());
        if let Some(multiplier) = read_value::<f64, _>(lookup, &key) {
            skills = match skills.clone().with_multiplier(kind, multiplier) {
                Ok(updated) => updated,
                Err(e) => {
                    warn!("Ignoring {}: {}", key, e);
                    skills
                }
            };
        }

        let bonus = BonusKind::for_skill(kind);
        let key = format!("SKILLS_BONUS_{}", kind.key());
        if let Some(rate) = read_value::<f64, _>(lookup, &key) {
            skills = match skills.clone().with_bonus_rate(bonus, rate) {
                Ok(updated) => updated,
                Err(e) => {
                    warn!("Ignoring {}: {}", key, e);
                    skills
                }
            };
        }
    }

    skills
}

fn parse_skill_list(raw: &str) -> Vec<SkillKind> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| match SkillKind::from_str(name) {
            Ok(kind) => Some(kind),
            Err(_) => {
                warn!("Ignoring unknown skill '{}' in SKILLS_ENABLED", name);
                None
            }
        })
        .collect()
}

/// Platform data directory plus `playerdata`, or `./playerdata`.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "skills")
        .map(|dirs| dirs.data_dir().join("playerdata"))
        .unwrap_or_else(|| PathBuf::from("./playerdata"))
}

fn read_value<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

fn read_flag<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!("Ignoring {}={:?}: expected true or false", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progression_core::ConfigOracle;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(config.skills, SkillsConfig::default());
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.autosave_interval, Some(Duration::from_secs(300)));
        assert!(config.data_dir.ends_with("playerdata"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[
            ("SKILLS_DATA_DIR", "/srv/skills"),
            ("SKILLS_BASE_XP", "50"),
            ("SKILLS_EXPONENT", "1.25"),
            ("SKILLS_BONUSES_ENABLED", "false"),
            ("SKILLS_ENABLED", "mining, combat"),
            ("SKILLS_XP_MULTIPLIER_MINING", "2.5"),
            ("SKILLS_BONUS_TRADING", "1.0"),
            ("SKILLS_SAVE_ATTEMPTS", "5"),
            ("SKILLS_SAVE_BACKOFF_MS", "10"),
            ("SKILLS_AUTOSAVE_SECS", "0"),
        ]));

        assert_eq!(config.data_dir, PathBuf::from("/srv/skills"));
        assert_eq!(config.skills.base_xp(), 50.0);
        assert_eq!(config.skills.exponent(), 1.25);
        assert!(!config.skills.bonuses_enabled());
        assert!(config.skills.is_skill_enabled(SkillKind::Mining));
        assert!(config.skills.is_skill_enabled(SkillKind::Combat));
        assert!(!config.skills.is_skill_enabled(SkillKind::Fishing));
        assert_eq!(config.skills.experience_multiplier(SkillKind::Mining), 2.5);
        assert_eq!(config.skills.bonus_rate(BonusKind::TradingDiscount), 1.0);
        assert_eq!(config.retry.max_attempts(), 5);
        assert_eq!(config.retry.initial_backoff(), Duration::from_millis(10));
        assert_eq!(config.autosave_interval, None);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[
            ("SKILLS_BASE_XP", "-1"),
            ("SKILLS_EXPONENT", "steep"),
            ("SKILLS_XP_MULTIPLIER_COMBAT", "0"),
            ("SKILLS_BONUS_MINING", "-0.5"),
            ("SKILLS_SAVE_ATTEMPTS", "0"),
            ("SKILLS_BONUSES_ENABLED", "maybe"),
        ]));

        assert_eq!(config.skills.base_xp(), 100.0);
        assert_eq!(config.skills.exponent(), 1.5);
        assert_eq!(config.skills.experience_multiplier(SkillKind::Combat), 1.0);
        assert_eq!(config.skills.bonus_rate(BonusKind::MiningDoubleDrop), 0.5);
        assert!(config.skills.bonuses_enabled());
        assert_eq!(
            config.retry.max_attempts(),
            RetryPolicy::DEFAULT_MAX_ATTEMPTS
        );
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(400));
        assert!(policy.backoff(64) >= policy.backoff(31));
    }
}
