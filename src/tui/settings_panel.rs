//! Wallpaper settings panel: which rows are shown and how each one cycles.

use crate::fields::{Background, Font, FontSize, ShowType};
use crate::tui::enums::SettingRow;
use crate::wallpaper::{Entitlement, Setting, WallpaperConfig};

const CONTRAST_STEP: u8 = 5;

/// Rows to show, top to bottom.
pub fn rows(config: &WallpaperConfig, entitlement: &Entitlement) -> Vec<SettingRow> {
    let mut rows = vec![SettingRow::Background];
    if config.background == Background::BlackWhite {
        rows.push(SettingRow::Contrast);
    }
    rows.extend([
        SettingRow::Font,
        SettingRow::FontSize,
        SettingRow::ShowType,
        SettingRow::AutoUpdate,
    ]);
    if !entitlement.is_premium() {
        rows.push(SettingRow::Unlock);
    }
    rows.push(SettingRow::Apply);
    rows
}

/// Current value of a row, as displayed. Premium options are tagged while locked.
pub fn value_text(row: SettingRow, config: &WallpaperConfig, entitlement: &Entitlement) -> String {
    match row {
        SettingRow::Background => config.background.label().to_string(),
        SettingRow::Contrast => format!("{}%", config.contrast),
        SettingRow::Font => config.font.label().to_string(),
        SettingRow::FontSize => config.font_size.label().to_string(),
        SettingRow::ShowType => config.show_type.label().to_string(),
        SettingRow::AutoUpdate => if config.auto_update { "On" } else { "Off" }.to_string(),
        SettingRow::Unlock if !entitlement.is_premium() => "Upgrade to Premium (u)".to_string(),
        SettingRow::Unlock => "Unlocked".to_string(),
        SettingRow::Apply => "Press Enter".to_string(),
    }
}

/// Number of premium options hidden from a row while locked.
pub fn locked_count(row: SettingRow, entitlement: &Entitlement) -> usize {
    if entitlement.is_premium() {
        return 0;
    }
    match row {
        SettingRow::Background => Background::ALL.iter().filter(|b| b.is_premium()).count(),
        SettingRow::Font => Font::ALL.iter().filter(|f| f.is_premium()).count(),
        _ => 0,
    }
}

fn next_in<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> Option<T> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match options.iter().position(|&o| o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    Some(options[next])
}

/// The setting produced by moving `row` one step. Only entitled options are offered.
///
/// Returns `None` for rows that are actions rather than values.
pub fn cycle(
    row: SettingRow,
    forward: bool,
    config: &WallpaperConfig,
    entitlement: &Entitlement,
) -> Option<Setting> {
    let premium = entitlement.is_premium();
    match row {
        SettingRow::Background => {
            let options: Vec<Background> = Background::ALL
                .into_iter()
                .filter(|b| premium || !b.is_premium())
                .collect();
            next_in(&options, config.background, forward).map(Setting::Background)
        }
        SettingRow::Font => {
            let options: Vec<Font> = Font::ALL
                .into_iter()
                .filter(|f| premium || !f.is_premium())
                .collect();
            next_in(&options, config.font, forward).map(Setting::Font)
        }
        SettingRow::FontSize => next_in(&FontSize::ALL, config.font_size, forward).map(Setting::FontSize),
        SettingRow::ShowType => next_in(&ShowType::ALL, config.show_type, forward).map(Setting::ShowType),
        SettingRow::Contrast => {
            let value = if forward {
                config.contrast.saturating_add(CONTRAST_STEP).min(100)
            } else {
                config.contrast.saturating_sub(CONTRAST_STEP)
            };
            Some(Setting::Contrast(value))
        }
        SettingRow::AutoUpdate => Some(Setting::AutoUpdate(!config.auto_update)),
        SettingRow::Unlock | SettingRow::Apply => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_depend_on_background_and_premium() {
        let free = Entitlement::default();
        let config = WallpaperConfig::default();
        let r = rows(&config, &free);
        assert!(r.contains(&SettingRow::Contrast));
        assert!(r.contains(&SettingRow::Unlock));
        assert_eq!(r.last(), Some(&SettingRow::Apply));

        let solid = WallpaperConfig {
            background: Background::SolidWhite,
            ..config
        };
        let r = rows(&solid, &Entitlement::premium());
        assert!(!r.contains(&SettingRow::Contrast));
        assert!(!r.contains(&SettingRow::Unlock));
    }

    #[test]
    fn test_background_cycle_skips_premium_when_free() {
        let free = Entitlement::default();
        let mut config = WallpaperConfig::default();
        let mut seen = Vec::new();
        for _ in 0..6 {
            let setting = cycle(SettingRow::Background, true, &config, &free).unwrap();
            config.set(setting, &free).unwrap();
            seen.push(config.background);
        }
        assert!(seen.iter().all(|b| !b.is_premium()));
        assert_eq!(seen[2], Background::BlackWhite);

        let back = cycle(SettingRow::Background, false, &WallpaperConfig::default(), &free);
        assert_eq!(back, Some(Setting::Background(Background::SolidWhite)));
    }

    #[test]
    fn test_background_cycle_reaches_premium_after_upgrade() {
        let premium = Entitlement::premium();
        let config = WallpaperConfig {
            background: Background::SolidWhite,
            ..WallpaperConfig::default()
        };
        assert_eq!(
            cycle(SettingRow::Background, true, &config, &premium),
            Some(Setting::Background(Background::GradientPurple))
        );
    }

    #[test]
    fn test_font_cycle_and_lock_count() {
        let free = Entitlement::default();
        let config = WallpaperConfig {
            font: Font::Poppins,
            ..WallpaperConfig::default()
        };
        assert_eq!(cycle(SettingRow::Font, true, &config, &free), Some(Setting::Font(Font::Inter)));
        assert_eq!(locked_count(SettingRow::Font, &free), 1);
        assert_eq!(locked_count(SettingRow::Background, &free), 4);
        assert_eq!(locked_count(SettingRow::Background, &Entitlement::premium()), 0);
    }

    #[test]
    fn test_contrast_steps_are_clamped() {
        let free = Entitlement::default();
        let high = WallpaperConfig {
            contrast: 98,
            ..WallpaperConfig::default()
        };
        assert_eq!(cycle(SettingRow::Contrast, true, &high, &free), Some(Setting::Contrast(100)));
        let low = WallpaperConfig {
            contrast: 3,
            ..WallpaperConfig::default()
        };
        assert_eq!(cycle(SettingRow::Contrast, false, &low, &free), Some(Setting::Contrast(0)));
    }

    #[test]
    fn test_action_rows_do_not_cycle() {
        let config = WallpaperConfig::default();
        let free = Entitlement::default();
        assert_eq!(cycle(SettingRow::Apply, true, &config, &free), None);
        assert_eq!(cycle(SettingRow::Unlock, true, &config, &free), None);
        assert_eq!(
            cycle(SettingRow::AutoUpdate, true, &config, &free),
            Some(Setting::AutoUpdate(false))
        );
    }
}
