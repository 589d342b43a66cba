//! Crate-level error type.

use thiserror::Error;

use crate::task::TimeParseError;
use crate::wallpaper::SettingError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("Invalid wallpaper setting: {0}")]
    Setting(#[from] SettingError),

    #[error("Invalid time: {0}")]
    Time(#[from] TimeParseError),

    #[error("Not logged in. Run `propaper login` first.")]
    NotLoggedIn,

    #[error("Invalid log filter: {0}")]
    LogFilter(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
