//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for list commands.
const fn default_page_size() -> u32 {
    20
}

/// Default change history retention, in days.
const fn default_history_retention_days() -> u32 {
    90
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size used when a list command is given no `--limit`.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Age after which `history prune` removes change records.
    #[serde(default = "default_history_retention_days")]
    pub history_retention_days: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            history_retention_days: default_history_retention_days(),
        }
    }
}
