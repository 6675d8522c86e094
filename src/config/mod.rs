use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_ENV: &str = "REP_COACH_CONFIG";
const DB_PATH_ENV: &str = "REP_COACH_DB_PATH";
const API_KEY_ENV: &str = "REP_COACH_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub cue: CueConfig,

    #[serde(default)]
    pub dietician: DieticianConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database directory; defaults to ~/.rep-coach/db
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// How plank hold time accumulates per holding frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldTiming {
    /// Elapsed time between frame timestamps
    Elapsed,
    /// Exactly 1 / nominal_fps per frame
    FixedRate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_min_visibility")]
    pub min_visibility: f32,

    #[serde(default = "default_hold_timing")]
    pub hold_timing: HoldTiming,

    #[serde(default = "default_nominal_fps")]
    pub nominal_fps: f64,

    #[serde(default = "default_max_frame_gap_ms")]
    pub max_frame_gap_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CueConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DieticianConfig {
    /// File holding the API key; defaults to ~/.rep-coach/api_key
    #[serde(default)]
    pub api_key_path: Option<PathBuf>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

// Default value functions
fn default_min_visibility() -> f32 {
    0.5
}

fn default_hold_timing() -> HoldTiming {
    HoldTiming::Elapsed
}

fn default_nominal_fps() -> f64 {
    30.0
}

fn default_max_frame_gap_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            min_visibility: default_min_visibility(),
            hold_timing: default_hold_timing(),
            nominal_fps: default_nominal_fps(),
            max_frame_gap_ms: default_max_frame_gap_ms(),
        }
    }
}

impl CaptureConfig {
    /// Hold increment for a frame without a usable predecessor
    ///
    /// Rates that are not positive, or so small the interval overflows a
    /// `Duration`, fall back to the default rate.
    pub fn nominal_interval(&self) -> Duration {
        let fallback = || Duration::from_secs_f64(1.0 / default_nominal_fps());
        if self.nominal_fps > 0.0 {
            Duration::try_from_secs_f64(1.0 / self.nominal_fps).unwrap_or_else(|_| fallback())
        } else {
            fallback()
        }
    }

    pub fn max_frame_gap(&self) -> Duration {
        Duration::from_millis(self.max_frame_gap_ms)
    }
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Default for DieticianConfig {
    fn default() -> Self {
        Self {
            api_key_path: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.rep-coach/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".rep-coach"))
    }

    /// Get config file path, honoring REP_COACH_CONFIG
    pub fn config_file() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from `path`, falling back to defaults if it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Resolve the database directory: REP_COACH_DB_PATH, then config, then default
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("db")),
        }
    }

    /// Read the dietician API key, if one is configured
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            let key = key.trim().to_string();
            if !key.is_empty() {
                return Some(key);
            }
        }

        let path = match &self.dietician.api_key_path {
            Some(path) => path.clone(),
            None => Self::config_dir().ok()?.join("api_key"),
        };

        match fs::read_to_string(&path) {
            Ok(contents) => {
                let key = contents.trim().to_string();
                (!key.is_empty()).then_some(key)
            }
            Err(e) => {
                tracing::debug!("No API key at {:?}: {}", path, e);
                None
            }
        }
    }
}
