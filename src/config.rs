// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::Priority;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_preview_weeks() -> u32 {
    4
}
fn default_attend_task_weeks() -> u32 {
    2
}
fn default_attend_task_horizon_days() -> u32 {
    14
}

fn default_study_session_start() -> String {
    "10:00".to_string()
}
fn default_study_session_end() -> String {
    "11:00".to_string()
}

fn default_user_id() -> String {
    "local".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// How many weeks of a new class are put on the calendar right away.
    #[serde(default = "default_preview_weeks")]
    pub preview_weeks: u32,
    /// Only the first N preview weeks also get "Attend ..." tasks.
    #[serde(default = "default_attend_task_weeks")]
    pub attend_task_weeks: u32,
    #[serde(default = "default_attend_task_horizon_days")]
    pub attend_task_horizon_days: u32,

    #[serde(default)]
    pub default_priority: Priority,

    #[serde(default = "default_study_session_start")]
    pub study_session_start: String, // Format "HH:MM"
    #[serde(default = "default_study_session_end")]
    pub study_session_end: String,

    #[serde(default = "default_user_id")]
    pub default_user_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Match the serde defaults
            preview_weeks: 4,
            attend_task_weeks: 2,
            attend_task_horizon_days: 14,
            default_priority: Priority::P4,
            study_session_start: "10:00".to_string(),
            study_session_end: "11:00".to_string(),
            default_user_id: "local".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::info!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Whether an error from `load` means the config file does not exist,
    /// either through our own message or an io NotFound anywhere in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn missing_keys_use_defaults() {
        let cfg: Config = toml::from_str("preview_weeks = 6\n").unwrap();
        assert_eq!(cfg.preview_weeks, 6);
        assert_eq!(cfg.attend_task_weeks, 2);
        assert_eq!(cfg.default_priority, Priority::P4);
        assert_eq!(cfg.study_session_start, "10:00");
    }

    #[test]
    fn serde_defaults_match_default_impl() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load() {
        let ctx = TestContext::new();
        assert!(Config::is_missing_config_error(
            &Config::load(&ctx).unwrap_err()
        ));
        assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());

        let cfg = Config {
            preview_weeks: 3,
            default_priority: Priority::P2,
            ..Config::default()
        };
        cfg.save(&ctx).unwrap();
        assert_eq!(Config::load(&ctx).unwrap(), cfg);
    }

    #[test]
    fn broken_file_is_reported() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "preview_weeks = \"many\"").unwrap();
        let err = Config::load_or_default(&ctx).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
