//! Enumerations for TUI state management.
//!
//! The screen itself lives in [`crate::controller::Screen`]; these are the
//! purely visual bits layered on top of it.

/// Transient layer drawn over the active screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Overlay {
    None,
    Help,
}

/// Tone of the status bar message.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StatusKind {
    Info,
    Error,
}

/// Row highlighted in the wallpaper settings panel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SettingRow {
    Background,
    /// Only offered while the background is black & white.
    Contrast,
    Font,
    FontSize,
    ShowType,
    AutoUpdate,
    Unlock,
    Apply,
}

impl SettingRow {
    pub fn label(self) -> &'static str {
        match self {
            SettingRow::Background => "Background",
            SettingRow::Contrast => "Contrast",
            SettingRow::Font => "Font",
            SettingRow::FontSize => "Font Size",
            SettingRow::ShowType => "Show Tasks",
            SettingRow::AutoUpdate => "Auto-update based on time",
            SettingRow::Unlock => "Premium features",
            SettingRow::Apply => "Set as Wallpaper",
        }
    }
}
