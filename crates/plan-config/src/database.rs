//! Database location.

use serde::{Deserialize, Serialize};

/// Path used for in-memory databases.
pub const IN_MEMORY: &str = ":memory:";

fn default_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("plan").join("plan.db"))
        .and_then(|path| path.to_str().map(String::from))
        .unwrap_or_else(|| String::from("plan.db"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_points_at_plan_db() {
        let config = DatabaseConfig::default();
        assert!(config.path.ends_with("plan.db"), "{}", config.path);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn memory_path_is_detected() {
        let config = DatabaseConfig {
            path: IN_MEMORY.into(),
        };
        assert!(config.is_in_memory());
    }
}
