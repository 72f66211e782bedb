//! Wiring shared by every command.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use progression_core::{BonusManager, ConfigOracle, ExperienceCalculator, PcgRandom};
use runtime::{
    FileProfileRepository, PlayerDataManager, ProfileRepository, RuntimeConfig, StimulusHandler,
};
use tokio::runtime::Handle;

pub struct Context {
    pub config: RuntimeConfig,
    pub repository: Arc<FileProfileRepository>,
    pub manager: Arc<PlayerDataManager>,
    pub handler: StimulusHandler,
}

impl Context {
    pub fn from_env() -> Result<Self> {
        let config = RuntimeConfig::from_env();
        let formula = config.skills.formula();

        let repository = Arc::new(FileProfileRepository::new(&config.data_dir, formula));
        repository.initialize().with_context(|| {
            format!("failed to open profile store at {}", config.data_dir.display())
        })?;
        tracing::debug!("Profile store: {}", config.data_dir.display());

        let manager = Arc::new(PlayerDataManager::new(
            repository.clone(),
            formula,
            config.retry,
            Handle::current(),
        ));

        let oracle: Arc<dyn ConfigOracle> = Arc::new(config.skills.clone());
        let random = Arc::new(PcgRandom::seeded(rand::random()));
        let handler = StimulusHandler::new(
            Arc::clone(&manager),
            ExperienceCalculator::new(Arc::clone(&oracle)),
            BonusManager::new(Arc::clone(&oracle), random),
            oracle,
        );

        Ok(Self {
            config,
            repository,
            manager,
            handler,
        })
    }
}
