use crate::config::AppConfig;
use crate::services::SessionRegistry;

/// Shared handler state: the live session registry and the loaded config.
pub struct AppState {
    pub registry: SessionRegistry,
    pub config: AppConfig,
}

impl AppState {
    /// Registry with the bundled rules engine, seeded and scored per `config`.
    pub fn new(config: AppConfig) -> Self {
        let registry = SessionRegistry::with_rules(config.engine_seed, config.target_score);
        Self { registry, config }
    }

    pub fn with_registry(registry: SessionRegistry, config: AppConfig) -> Self {
        Self { registry, config }
    }
}
