use anyhow::Context;
use plan_config::PlanConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (with `.env`), then apply `--db`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<PlanConfig> {
    let mut config = PlanConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(&mut config, flags);
    Ok(config)
}

fn apply_overrides(config: &mut PlanConfig, flags: &GlobalFlags) {
    if let Some(db) = flags.db.as_deref() {
        config.database.path = db.to_string();
    }
}
