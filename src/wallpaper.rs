//! Wallpaper rendering preferences and the premium entitlement that gates them.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::fields::{Background, Font, FontSize, ShowType};

/// Premium capability for the session.
///
/// Starts out free; [`Entitlement::upgrade`] is one-way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Entitlement {
    premium: bool,
}

impl Entitlement {
    #[cfg(test)]
    pub fn premium() -> Self {
        Self { premium: true }
    }

    pub fn is_premium(&self) -> bool {
        self.premium
    }

    /// Returns true when this call performed the upgrade.
    pub fn upgrade(&mut self) -> bool {
        if self.premium {
            return false;
        }
        self.premium = true;
        info!("premium entitlement activated");
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WallpaperConfig {
    pub background: Background,
    pub font: Font,
    pub font_size: FontSize,
    pub show_type: ShowType,
    pub contrast: u8,
    pub brightness: u8,
    pub auto_update: bool,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            background: Background::BlackWhite,
            font: Font::Inter,
            font_size: FontSize::Medium,
            show_type: ShowType::All,
            contrast: 50,
            brightness: 50,
            auto_update: true,
        }
    }
}

/// A single typed assignment to one [`WallpaperConfig`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Background(Background),
    Font(Font),
    FontSize(FontSize),
    ShowType(ShowType),
    Contrast(u8),
    Brightness(u8),
    AutoUpdate(bool),
}

impl Setting {
    /// Parse a string-keyed assignment such as `("background", "gradient_blue")`.
    ///
    /// Keys are accepted in camelCase (`fontSize`), snake_case or kebab-case.
    pub fn parse(key: &str, value: &str) -> Result<Self, SettingError> {
        let invalid = || SettingError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let normalised = key.replace(['-', '_'], "").to_ascii_lowercase();
        let setting = match normalised.as_str() {
            "background" => Setting::Background(Background::from_str(value, true).map_err(|_| invalid())?),
            "font" => Setting::Font(Font::from_str(value, true).map_err(|_| invalid())?),
            "fontsize" => Setting::FontSize(FontSize::from_str(value, true).map_err(|_| invalid())?),
            "showtype" => Setting::ShowType(ShowType::from_str(value, true).map_err(|_| invalid())?),
            "contrast" => Setting::Contrast(parse_percent(key, value)?),
            "brightness" => Setting::Brightness(parse_percent(key, value)?),
            "autoupdate" => Setting::AutoUpdate(value.parse().map_err(|_| invalid())?),
            _ => return Err(SettingError::UnknownKey(key.to_string())),
        };
        Ok(setting)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Setting::Background(_) => "background",
            Setting::Font(_) => "font",
            Setting::FontSize(_) => "fontSize",
            Setting::ShowType(_) => "showType",
            Setting::Contrast(_) => "contrast",
            Setting::Brightness(_) => "brightness",
            Setting::AutoUpdate(_) => "autoUpdate",
        }
    }

    /// The premium-only value this setting would assign, if any.
    fn premium_value(&self) -> Option<&'static str> {
        match *self {
            Setting::Background(b) if b.is_premium() => Some(b.label()),
            Setting::Font(f) if f.is_premium() => Some(f.label()),
            _ => None,
        }
    }
}

fn parse_percent(key: &str, value: &str) -> Result<u8, SettingError> {
    let n: i64 = value.trim().parse().map_err(|_| SettingError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })?;
    u8::try_from(n)
        .ok()
        .filter(|n| *n <= 100)
        .ok_or(SettingError::OutOfRange { key: key.to_string(), value: n })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingError {
    #[error("unknown wallpaper setting '{0}'")]
    UnknownKey(String),
    #[error("'{value}' is not a valid value for {key}")]
    InvalidValue { key: String, value: String },
    #[error("{key} must be between 0 and 100, got {value}")]
    OutOfRange { key: String, value: i64 },
    #[error("{0} requires premium")]
    PremiumRequired(&'static str),
}

impl WallpaperConfig {
    /// Assign one field after checking its value against the entitlement.
    ///
    /// On error the configuration is left unchanged.
    pub fn set(&mut self, setting: Setting, entitlement: &Entitlement) -> Result<(), SettingError> {
        if let Some(value) = setting.premium_value() {
            if !entitlement.is_premium() {
                return Err(SettingError::PremiumRequired(value));
            }
        }
        match setting {
            Setting::Background(v) => self.background = v,
            Setting::Font(v) => self.font = v,
            Setting::FontSize(v) => self.font_size = v,
            Setting::ShowType(v) => self.show_type = v,
            Setting::Contrast(v) | Setting::Brightness(v) if v > 100 => {
                return Err(SettingError::OutOfRange {
                    key: setting.key().to_string(),
                    value: v as i64,
                })
            }
            Setting::Contrast(v) => self.contrast = v,
            Setting::Brightness(v) => self.brightness = v,
            Setting::AutoUpdate(v) => self.auto_update = v,
        }
        debug!(setting = setting.key(), value = ?setting, "wallpaper setting changed");
        Ok(())
    }

    /// Check a whole configuration, e.g. one read from a file.
    pub fn validate(&self, entitlement: &Entitlement) -> Result<(), SettingError> {
        let mut scratch = WallpaperConfig::default();
        for setting in self.settings() {
            scratch.set(setting, entitlement)?;
        }
        Ok(())
    }

    fn settings(&self) -> [Setting; 7] {
        [
            Setting::Background(self.background),
            Setting::Font(self.font),
            Setting::FontSize(self.font_size),
            Setting::ShowType(self.show_type),
            Setting::Contrast(self.contrast),
            Setting::Brightness(self.brightness),
            Setting::AutoUpdate(self.auto_update),
        ]
    }
}
