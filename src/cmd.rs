//! Command implementations for the CLI interface.

use std::fmt::Write as _;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::config::AppConfig;
use crate::controller::Controller;
use crate::error::{AppError, Result};
use crate::fields::{Background, Font, FontSize, ShowType};
use crate::notify::{LatestNotification, Notification};
use crate::preview::Preview;
use crate::session::Session;
use crate::store::TaskStore;
use crate::task::ClockTime;
use crate::tui::run::run_tui;
use crate::wallpaper::{Setting, SettingError};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (the default).
    Ui,

    /// Mark this machine as logged in.
    Login,

    /// Clear the login flag.
    Logout,

    /// Print the wallpaper preview of the example tasks.
    Preview {
        /// Which tasks to show: all | today | priority.
        #[arg(long, value_enum)]
        show: Option<ShowType>,
        /// Background: black_white | solid_black | solid_white | gradient_purple | gradient_blue | gradient_green | image.
        #[arg(long, value_enum)]
        background: Option<Background>,
        /// Font family: Inter | Roboto | Poppins | Montserrat.
        #[arg(long, value_enum)]
        font: Option<Font>,
        /// Font size: small | medium | large.
        #[arg(long, value_enum)]
        font_size: Option<FontSize>,
        /// Contrast for the black & white background, 0-100.
        #[arg(long)]
        contrast: Option<u8>,
        /// Any other setting as KEY=VALUE, e.g. brightness=70 or autoUpdate=false. Repeatable.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Upgrade to premium before applying settings.
        #[arg(long)]
        premium: bool,
        /// Run one auto-complete sweep at this time first, e.g. "5:00 PM".
        #[arg(long)]
        at: Option<String>,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the TUI, provided the session guard lets us in.
pub fn cmd_ui(session: &Session, config: &AppConfig) -> Result<()> {
    if !session.is_logged_in() {
        return Err(AppError::NotLoggedIn);
    }
    let controller = Controller::new(
        TaskStore::with_sample_tasks(),
        config.wallpaper,
        config.sweep_interval(),
        LatestNotification::default(),
    );
    info!("starting TUI");
    run_tui(controller)?;
    info!("TUI closed");
    Ok(())
}

pub fn cmd_login(session: &mut Session) -> Result<()> {
    session.login()?;
    if let Some(at) = session.state().logged_in_at {
        println!("Logged in at {}.", at.format("%Y-%m-%d %H:%M UTC"));
    }
    println!("Run `propaper` to open your tasks.");
    Ok(())
}

pub fn cmd_logout(session: &mut Session) -> Result<()> {
    session.logout()?;
    println!("Logged out ({} cleared).", session.path().display());
    Ok(())
}

/// Build the preview of the example tasks under the given settings and print it.
#[allow(clippy::too_many_arguments)]
pub fn cmd_preview(
    config: &AppConfig,
    show: Option<ShowType>,
    background: Option<Background>,
    font: Option<Font>,
    font_size: Option<FontSize>,
    contrast: Option<u8>,
    set: &[String],
    premium: bool,
    at: Option<String>,
    json: bool,
) -> Result<()> {
    let mut controller: Controller<Vec<Notification>> = Controller::new(
        TaskStore::with_sample_tasks(),
        config.wallpaper,
        config.sweep_interval(),
        Vec::new(),
    );
    if premium {
        controller.upgrade();
    }

    let settings = [
        show.map(Setting::ShowType),
        background.map(Setting::Background),
        font.map(Setting::Font),
        font_size.map(Setting::FontSize),
        contrast.map(Setting::Contrast),
    ];
    for setting in settings.into_iter().flatten() {
        controller.set_setting(setting)?;
    }
    for raw in set {
        controller.set_setting(parse_assignment(raw)?)?;
    }

    if let Some(at) = at {
        let clock: ClockTime = at.parse()?;
        let completed = controller.sweep(clock);
        info!(at = %clock, count = completed.len(), "sweep before preview");
    }

    let preview = controller.preview();
    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        print!("{}", format_preview(&preview));
    }
    Ok(())
}

/// Parse a `KEY=VALUE` pair from the command line.
pub fn parse_assignment(raw: &str) -> std::result::Result<Setting, SettingError> {
    match raw.split_once('=') {
        Some((key, value)) => Setting::parse(key.trim(), value.trim()),
        None => Err(SettingError::InvalidValue {
            key: raw.to_string(),
            value: String::new(),
        }),
    }
}

/// Plain-text rendering of a preview for the terminal.
pub fn format_preview(preview: &Preview<'_>) -> String {
    let style = &preview.style;
    let mut out = String::new();
    let _ = writeln!(out, "TODAY'S TASKS");
    let _ = writeln!(out, "  background: {}", style.background.class_name());
    let _ = writeln!(out, "  text:       {} / {}", style.text.class_name(), style.text.card_class_name());
    let _ = writeln!(out, "  font:       {} ({})", style.font.label(), style.font_class());
    if style.marker {
        let _ = writeln!(out, "  marker:     palette");
    }
    let _ = writeln!(out);
    if preview.tasks.is_empty() {
        let _ = writeln!(out, "  No tasks to display");
    }
    for task in &preview.tasks {
        let _ = writeln!(out, "  {:<28} {:>8}", task.title, task.time);
    }
    out
}

pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallpaper::{Entitlement, WallpaperConfig};

    #[test]
    fn test_preview_requires_premium_for_gradients() {
        let err = cmd_preview(
            &AppConfig::default(),
            None,
            Some(Background::GradientPurple),
            None,
            None,
            None,
            &[],
            false,
            None,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Setting(_)));
    }

    #[test]
    fn test_preview_rejects_bad_time() {
        let err = cmd_preview(&AppConfig::default(), None, None, None, None, None, &[], false, Some("noon".into()), false)
            .unwrap_err();
        assert!(matches!(err, AppError::Time(_)));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("brightness = 70"), Ok(Setting::Brightness(70)));
        assert_eq!(parse_assignment("auto-update=false"), Ok(Setting::AutoUpdate(false)));
        assert!(matches!(parse_assignment("brightness"), Err(SettingError::InvalidValue { .. })));
        assert!(matches!(parse_assignment("volume=3"), Err(SettingError::UnknownKey(_))));
    }

    #[test]
    fn test_preview_set_rejects_premium_font() {
        let err = cmd_preview(
            &AppConfig::default(),
            None,
            None,
            None,
            None,
            None,
            &["font=Montserrat".to_string()],
            false,
            None,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Setting(SettingError::PremiumRequired(_))));
    }

    #[test]
    fn test_format_preview_lists_visible_tasks() {
        let store = TaskStore::with_sample_tasks();
        let config = WallpaperConfig {
            show_type: ShowType::Priority,
            ..WallpaperConfig::default()
        };
        let preview = crate::preview::preview(store.tasks(), &config, &Entitlement::default());
        let text = format_preview(&preview);
        assert!(text.contains("Team meeting"));
        assert!(text.contains("Finish project proposal"));
        assert!(!text.contains("Call mom"));
        assert!(text.contains("to-gray-500"));
        assert!(!text.contains("marker"));
    }

    #[test]
    fn test_format_empty_preview() {
        let mut store = TaskStore::with_sample_tasks();
        store.sweep_auto_complete("11:59 PM".parse().unwrap());
        let preview = crate::preview::preview(store.tasks(), &WallpaperConfig::default(), &Entitlement::default());
        assert!(format_preview(&preview).contains("No tasks to display"));
    }
}
