//! Runtime services for skill progression.
//!
//! This crate owns everything around the pure rules in `progression-core`:
//! profile storage, the in-memory profile cache, background saving and the
//! dispatch of gameplay stimuli into experience awards.
//!
//! Modules are organized by responsibility:
//! - [`manager`] hosts the profile cache and the award transaction
//! - [`repository`] provides the storage trait and its file/in-memory backends
//! - [`stimulus`] turns raw gameplay events into awards and bonuses
//! - [`config`] loads runtime settings from the environment
//! - `workers` keeps save retry and autosave internal to the crate
pub mod config;
pub mod manager;
pub mod repository;
pub mod stimulus;

mod workers;

pub use config::{RetryPolicy, RuntimeConfig, default_data_dir};
pub use manager::{CachedProfile, PlayerDataManager, SaveReport};
pub use repository::{
    FileProfileRepository, InMemoryProfileRepository, ProfileRecord, ProfileRepository,
    RepositoryError, SkillRecord,
};
pub use stimulus::{BonusOutcome, Stimulus, StimulusHandler, StimulusOutcome};
pub use workers::{SaveMetrics, SaveMetricsSnapshot, save_with_retry};
