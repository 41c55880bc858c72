use crate::error::{DrResult, DrillError};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub store: StoreParams,
    #[command(flatten)]
    pub capture: CaptureParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreParams {
    #[arg(global = true, long, default_value = "data")]
    pub data_dir: String,
    #[arg(global = true, long, default_value = "keybinds.json")]
    pub keybinds_file: String,
    #[arg(global = true, long, default_value = "sequences.json")]
    pub sequences_file: String,
    #[arg(global = true, long, default_value = "playStats.json")]
    pub stats_file: String,
}

impl Default for StoreParams {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            keybinds_file: "keybinds.json".to_string(),
            sequences_file: "sequences.json".to_string(),
            stats_file: "playStats.json".to_string(),
        }
    }
}

impl StoreParams {
    pub fn keybinds_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.keybinds_file)
    }

    pub fn sequences_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.sequences_file)
    }

    pub fn stats_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.stats_file)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureParams {
    /// Input poll interval of the terminal session, in milliseconds
    #[arg(global = true, long, default_value_t = 50)]
    pub poll_ms: u64,
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self { poll_ms: 50 }
    }
}

impl CaptureParams {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms.max(1))
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DrResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DrillError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            DrillError::Config(format!("Failed to parse config '{}': {}", path.display(), e))
        })?;

        if config.capture.poll_ms == 0 {
            return Err(DrillError::Config("poll_ms must be greater than 0".into()));
        }
        Ok(config)
    }
}
