//! Global dayplan configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::store::JsonFileStore;

static DEFAULT_DATA_FILE: &str = "~/.local/share/dayplan/plans.json";

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

/// Global configuration at ~/.config/dayplan/config.toml
///
/// The plan document itself lives in the data file this config points at;
/// everything user-facing (theme, quick tasks, ...) is stored inside that
/// document, not here.
#[derive(Serialize, Deserialize, Clone)]
pub struct DayplanConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for DayplanConfig {
    fn default() -> Self {
        DayplanConfig {
            data_file: default_data_file(),
        }
    }
}

impl DayplanConfig {
    pub fn config_path() -> PlanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlanError::Config("Could not determine config directory".into()))?
            .join("dayplan");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> PlanResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: DayplanConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| PlanError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlanError::Config(e.to_string()))?;

        Ok(config)
    }

    /// The data file path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Display-friendly path, keeping `~` instead of the full home directory.
    pub fn display_path(&self) -> PathBuf {
        self.data_file.clone()
    }

    /// The store backing the plan document.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.data_path())
    }

    /// Create a default config file with all options commented out.
    fn create_default_config(path: &Path) -> PlanResult<()> {
        let contents = format!(
            "\
# dayplan configuration

# Where the plan document lives:
# data_file = \"{}\"
",
            DEFAULT_DATA_FILE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }
}
