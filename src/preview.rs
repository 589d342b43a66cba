//! Derived views of the task list.
//!
//! Everything here is a pure function of the tasks, the wallpaper configuration
//! and the entitlement. The TUI and the `preview` command both render from
//! these values; neither looks at raw settings directly.

use serde::Serialize;

use crate::fields::{Background, Font, FontSize, Priority, ShowType};
use crate::task::Task;
use crate::wallpaper::{Entitlement, WallpaperConfig};

/// Visual weight of a dashboard row, derived from its priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Strong,
    Moderate,
    Subtle,
}

impl From<Priority> for Emphasis {
    fn from(p: Priority) -> Self {
        match p {
            Priority::High => Emphasis::Strong,
            Priority::Medium => Emphasis::Moderate,
            Priority::Low => Emphasis::Subtle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRow<'a> {
    pub task: &'a Task,
    pub emphasis: Emphasis,
}

/// Every task in store order, annotated with its emphasis.
pub fn dashboard(tasks: &[Task]) -> Vec<DashboardRow<'_>> {
    tasks
        .iter()
        .map(|task| DashboardRow {
            task,
            emphasis: task.priority.into(),
        })
        .collect()
}

/// Tasks shown on the wallpaper, in store order.
///
/// Completed tasks are never shown. `Today` behaves like `All` because tasks
/// carry no date.
pub fn visible_tasks(tasks: &[Task], show: ShowType) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| !t.completed)
        .filter(|t| match show {
            ShowType::All | ShowType::Today => true,
            ShowType::Priority => t.priority == Priority::High,
        })
        .collect()
}

/// Gradient end points used by the premium backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Swatch {
    #[serde(rename = "purple-500")]
    Purple500,
    #[serde(rename = "pink-500")]
    Pink500,
    #[serde(rename = "blue-500")]
    Blue500,
    #[serde(rename = "indigo-500")]
    Indigo500,
    #[serde(rename = "green-400")]
    Green400,
    #[serde(rename = "teal-500")]
    Teal500,
}

impl Swatch {
    pub fn class_name(self) -> &'static str {
        match self {
            Swatch::Purple500 => "purple-500",
            Swatch::Pink500 => "pink-500",
            Swatch::Blue500 => "blue-500",
            Swatch::Indigo500 => "indigo-500",
            Swatch::Green400 => "green-400",
            Swatch::Teal500 => "teal-500",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackgroundToken {
    /// Vertical fade from gray-900 down to gray-`shade`00, `shade` in 0..=9.
    Monochrome { shade: u8 },
    SolidBlack,
    SolidWhite,
    Gradient { from: Swatch, to: Swatch },
    Image,
}

impl BackgroundToken {
    pub fn class_name(&self) -> String {
        match self {
            BackgroundToken::Monochrome { shade } => {
                format!("bg-gradient-to-b from-gray-900 to-gray-{shade}00")
            }
            BackgroundToken::SolidBlack => "bg-black".to_string(),
            BackgroundToken::SolidWhite => "bg-white".to_string(),
            BackgroundToken::Gradient { from, to } => format!(
                "bg-gradient-to-br from-{} to-{}",
                from.class_name(),
                to.class_name()
            ),
            BackgroundToken::Image => "bg-[url(/placeholder.svg?height=400&width=225)] bg-cover".to_string(),
        }
    }
}

/// Map contrast 0..=100 linearly onto gray shades 9..=0, rounding half up.
pub fn monochrome_shade(contrast: u8) -> u8 {
    let contrast = contrast.min(100) as u32;
    ((950 - 9 * contrast) / 100) as u8
}

pub fn background_token(background: Background, contrast: u8) -> BackgroundToken {
    match background {
        Background::BlackWhite => BackgroundToken::Monochrome {
            shade: monochrome_shade(contrast),
        },
        Background::SolidBlack => BackgroundToken::SolidBlack,
        Background::SolidWhite => BackgroundToken::SolidWhite,
        Background::GradientPurple => BackgroundToken::Gradient {
            from: Swatch::Purple500,
            to: Swatch::Pink500,
        },
        Background::GradientBlue => BackgroundToken::Gradient {
            from: Swatch::Blue500,
            to: Swatch::Indigo500,
        },
        Background::GradientGreen => BackgroundToken::Gradient {
            from: Swatch::Green400,
            to: Swatch::Teal500,
        },
        Background::Image => BackgroundToken::Image,
    }
}

/// Text colour family: light text on dark backgrounds or the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTone {
    LightOnDark,
    DarkOnLight,
}

impl TextTone {
    pub fn for_background(background: Background) -> Self {
        if background == Background::SolidWhite {
            TextTone::DarkOnLight
        } else {
            TextTone::LightOnDark
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            TextTone::LightOnDark => "text-white",
            TextTone::DarkOnLight => "text-black",
        }
    }

    /// Tint of the task cards on the wallpaper.
    pub fn card_class_name(self) -> &'static str {
        match self {
            TextTone::LightOnDark => "bg-white/10 backdrop-blur-sm",
            TextTone::DarkOnLight => "bg-black/10",
        }
    }
}

pub fn font_size_class(size: FontSize) -> &'static str {
    match size {
        FontSize::Small => "text-xs",
        FontSize::Medium => "text-sm",
        FontSize::Large => "text-base",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviewStyle {
    pub background: BackgroundToken,
    pub text: TextTone,
    pub font: Font,
    pub font_size: FontSize,
    /// Decorative palette marker, shown on premium gradients only.
    pub marker: bool,
}

impl PreviewStyle {
    pub fn font_class(&self) -> String {
        // every family currently maps onto the sans stack
        format!("font-sans {}", font_size_class(self.font_size))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview<'a> {
    pub tasks: Vec<&'a Task>,
    pub style: PreviewStyle,
}

/// The configuration as it may be rendered for `entitlement`.
///
/// Premium-only values fall back to the free defaults when the entitlement
/// does not cover them.
pub fn effective_config(config: &WallpaperConfig, entitlement: &Entitlement) -> WallpaperConfig {
    let mut effective = *config;
    if !entitlement.is_premium() {
        if effective.background.is_premium() {
            effective.background = Background::BlackWhite;
        }
        if effective.font.is_premium() {
            effective.font = Font::Inter;
        }
    }
    effective
}

pub fn preview_style(config: &WallpaperConfig, entitlement: &Entitlement) -> PreviewStyle {
    let config = effective_config(config, entitlement);
    PreviewStyle {
        background: background_token(config.background, config.contrast),
        text: TextTone::for_background(config.background),
        font: config.font,
        font_size: config.font_size,
        marker: entitlement.is_premium() && config.background.is_gradient(),
    }
}

/// Filtered and styled projection of the task list for the wallpaper.
pub fn preview<'a>(
    tasks: &'a [Task],
    config: &WallpaperConfig,
    entitlement: &Entitlement,
) -> Preview<'a> {
    Preview {
        tasks: visible_tasks(tasks, config.show_type),
        style: preview_style(config, entitlement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;

    fn titles<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_swatch_json_matches_class_name() {
        let all = [
            Swatch::Purple500,
            Swatch::Pink500,
            Swatch::Blue500,
            Swatch::Indigo500,
            Swatch::Green400,
            Swatch::Teal500,
        ];
        for swatch in all {
            assert_eq!(serde_json::to_value(swatch).unwrap(), swatch.class_name());
        }
        let token = BackgroundToken::Gradient {
            from: Swatch::Purple500,
            to: Swatch::Pink500,
        };
        assert_eq!(
            serde_json::to_value(token).unwrap(),
            serde_json::json!({"kind": "gradient", "from": "purple-500", "to": "pink-500"})
        );
    }

    #[test]
    fn test_priority_filter_on_sample_tasks() {
        let store = TaskStore::with_sample_tasks();
        let shown = visible_tasks(store.tasks(), ShowType::Priority);
        assert_eq!(titles(&shown), vec!["Team meeting", "Finish project proposal"]);
    }

    #[test]
    fn test_completed_tasks_hidden() {
        let mut store = TaskStore::with_sample_tasks();
        store.toggle_complete(1);
        assert_eq!(
            titles(&visible_tasks(store.tasks(), ShowType::Priority)),
            vec!["Finish project proposal"]
        );
        assert_eq!(visible_tasks(store.tasks(), ShowType::All).len(), 3);
    }

    #[test]
    fn test_today_filter_matches_all() {
        // no date on tasks yet, so "today" cannot narrow anything
        let mut store = TaskStore::with_sample_tasks();
        store.toggle_complete(2);
        assert_eq!(
            visible_tasks(store.tasks(), ShowType::Today),
            visible_tasks(store.tasks(), ShowType::All)
        );
    }

    #[test]
    fn test_dashboard_emphasis_keeps_order() {
        let store = TaskStore::with_sample_tasks();
        let rows = dashboard(store.tasks());
        let emphasis: Vec<Emphasis> = rows.iter().map(|r| r.emphasis).collect();
        assert_eq!(
            emphasis,
            vec![Emphasis::Strong, Emphasis::Moderate, Emphasis::Strong, Emphasis::Subtle]
        );
        assert_eq!(rows[3].task.title, "Call mom");
    }

    #[test]
    fn test_monochrome_shade() {
        assert_eq!(monochrome_shade(0), 9);
        assert_eq!(monochrome_shade(50), 5);
        assert_eq!(monochrome_shade(100), 0);
        assert_eq!(monochrome_shade(33), 6);
        assert_eq!(
            background_token(Background::BlackWhite, 0).class_name(),
            "bg-gradient-to-b from-gray-900 to-gray-900"
        );
    }

    #[test]
    fn test_contrast_only_affects_black_white() {
        assert_eq!(background_token(Background::SolidBlack, 0), background_token(Background::SolidBlack, 100));
        assert_eq!(
            background_token(Background::GradientGreen, 10).class_name(),
            "bg-gradient-to-br from-green-400 to-teal-500"
        );
    }

    #[test]
    fn test_text_tone() {
        for background in Background::ALL {
            let expected = if background == Background::SolidWhite {
                TextTone::DarkOnLight
            } else {
                TextTone::LightOnDark
            };
            assert_eq!(TextTone::for_background(background), expected);
        }
    }

    #[test]
    fn test_marker_needs_premium_gradient() {
        let mut config = WallpaperConfig {
            background: Background::GradientPurple,
            ..WallpaperConfig::default()
        };
        assert!(preview_style(&config, &Entitlement::premium()).marker);
        config.background = Background::Image;
        assert!(!preview_style(&config, &Entitlement::premium()).marker);
        config.background = Background::SolidBlack;
        assert!(!preview_style(&config, &Entitlement::premium()).marker);
    }

    #[test]
    fn test_premium_values_fall_back_without_entitlement() {
        let config = WallpaperConfig {
            background: Background::GradientBlue,
            font: Font::Montserrat,
            contrast: 100,
            ..WallpaperConfig::default()
        };
        let style = preview_style(&config, &Entitlement::default());
        assert_eq!(style.background, BackgroundToken::Monochrome { shade: 0 });
        assert_eq!(style.font, Font::Inter);
        assert!(!style.marker);

        let style = preview_style(&config, &Entitlement::premium());
        assert_eq!(style.font, Font::Montserrat);
        assert!(style.marker);
    }

    #[test]
    fn test_font_class() {
        let config = WallpaperConfig {
            font_size: FontSize::Large,
            ..WallpaperConfig::default()
        };
        assert_eq!(preview_style(&config, &Entitlement::default()).font_class(), "font-sans text-base");
    }
}
