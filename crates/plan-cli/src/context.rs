use std::path::Path;

use anyhow::Context;
use plan_config::PlanConfig;
use plan_db::service::PlanService;

/// Everything a command handler needs.
pub struct AppContext {
    pub service: PlanService,
    pub config: PlanConfig,
}

impl AppContext {
    /// Open the configured database, creating its parent directory on first use.
    pub async fn init(config: PlanConfig) -> anyhow::Result<Self> {
        let path = config.database.path.clone();
        if !config.database.is_in_memory() {
            if let Some(parent) = Path::new(&path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }

        let service = PlanService::new_local(&path)
            .await
            .with_context(|| format!("failed to open database at {path}"))?;
        tracing::debug!(path = %path, "planner context ready");

        Ok(Self { service, config })
    }
}
