//! Application configuration.
//!
//! Read from `config.toml` in the data directory (or an explicit `--config`
//! path). Every key is optional.
//!
//! ```toml
//! sweep_interval_secs = 60
//! log_file = "propaper.log"
//! log_level = "info"
//!
//! [wallpaper]
//! background = "solid_black"
//! fontSize = "large"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::timer::{DEFAULT_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL};
use crate::wallpaper::{Entitlement, WallpaperConfig};

pub const CONFIG_FILE: &str = "config.toml";
pub const DATA_DIR_NAME: &str = ".propaper";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sweep_interval_secs: u64,
    pub log_file: PathBuf,
    pub log_level: String,
    /// Wallpaper settings each session starts with.
    pub wallpaper: WallpaperConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL.as_secs(),
            log_file: PathBuf::from("propaper.log"),
            log_level: "info".to_string(),
            wallpaper: WallpaperConfig::default(),
        }
    }
}

/// A configuration plus what the loader noticed while reading it.
///
/// Config is read before tracing is installed, so nothing is logged during
/// loading. Call [`LoadedConfig::log`] once the subscriber is up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// File the configuration came from, `None` for built-in defaults.
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    pub fn log(&self) {
        match &self.source {
            Some(path) => info!(path = %path.display(), "config loaded"),
            None => debug!("no config file, using defaults"),
        }
        for warning in &self.warnings {
            warn!("{warning}");
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Otherwise `<data_dir>/config.toml` is
    /// used when present and the defaults when not.
    pub fn load(path: Option<&Path>, data_dir: &Path) -> Result<LoadedConfig> {
        let path = match path {
            Some(p) if !p.exists() => return Err(AppError::ConfigNotFound(p.display().to_string())),
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = data_dir.join(CONFIG_FILE);
                if !default_path.exists() {
                    return Ok(LoadedConfig {
                        config: Self::default(),
                        source: None,
                        warnings: Vec::new(),
                    });
                }
                default_path
            }
        };
        let text = fs::read_to_string(&path)?;
        let mut loaded = Self::from_toml(&text)?;
        loaded.source = Some(path);
        Ok(loaded)
    }

    pub fn from_toml(text: &str) -> Result<LoadedConfig> {
        let mut config: AppConfig = toml::from_str(text)?;
        let mut warnings = Vec::new();
        let secs = config.sweep_interval_secs;
        if secs == 0 || secs > MAX_SWEEP_INTERVAL.as_secs() {
            warnings.push(format!(
                "sweep_interval_secs must be between 1 and {}, got {}; using {}",
                MAX_SWEEP_INTERVAL.as_secs(),
                secs,
                DEFAULT_SWEEP_INTERVAL.as_secs()
            ));
            config.sweep_interval_secs = DEFAULT_SWEEP_INTERVAL.as_secs();
        }
        // sessions start without premium, so the file may only hold free values
        config.wallpaper.validate(&Entitlement::default())?;
        Ok(LoadedConfig {
            config,
            source: None,
            warnings,
        })
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// The log file path, resolved against `data_dir` when relative.
    pub fn log_path(&self, data_dir: &Path) -> PathBuf {
        if self.log_file.is_absolute() {
            self.log_file.clone()
        } else {
            data_dir.join(&self.log_file)
        }
    }
}

/// The data directory: an explicit override or `~/.propaper`.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> PathBuf {
    match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATA_DIR_NAME),
    }
}
