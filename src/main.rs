//! # ProPaper - task-based live wallpaper
//!
//! A small task list whose open items are rendered onto a simulated phone
//! wallpaper, in the terminal.
//!
//! ## Key Features
//!
//! - **Dashboard**: add, edit, delete and complete tasks scheduled at a time of day
//! - **Wallpaper settings**: background, font, size, contrast and which tasks to show
//! - **Live preview**: the wallpaper re-renders on every change
//! - **Auto-update**: once a minute, tasks whose time has passed are marked done
//! - **Premium**: gradients, a custom image and the Montserrat font after upgrading
//!
//! ## Quick Start
//!
//! ```bash
//! propaper login
//! propaper            # same as `propaper ui`
//! propaper preview --show priority
//! ```
//!
//! Tasks and settings last for one session. Only the login flag is stored,
//! in `~/.propaper/session.json`, next to an optional `config.toml`.

use std::fs::{self, OpenOptions};

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod controller;
pub mod error;
pub mod fields;
pub mod notify;
pub mod preview;
pub mod session;
pub mod store;
pub mod task;
pub mod timer;
pub mod wallpaper;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod settings_panel;
    pub mod task_form;
    pub mod utils;
}

use cli::{init_tracing, log_level, Cli, LogTarget};
use cmd::*;
use config::{resolve_data_dir, AppConfig};
use session::Session;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> error::Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());
    fs::create_dir_all(&data_dir)?;

    let loaded = AppConfig::load(cli.config.as_deref(), &data_dir)?;
    let config = &loaded.config;
    let command = cli.command.unwrap_or(Commands::Ui);

    // The TUI owns the terminal, so its logs go to a file.
    let target = match command {
        Commands::Ui => {
            let log_path = config.log_path(&data_dir);
            let file = OpenOptions::new().create(true).append(true).open(&log_path)?;
            LogTarget::File(file)
        }
        _ => LogTarget::Stderr,
    };
    init_tracing(&log_level(cli.verbose, cli.quiet, &config.log_level), target)?;
    loaded.log();

    let mut session = Session::load(&data_dir);

    match command {
        Commands::Ui => cmd_ui(&session, config),
        Commands::Login => cmd_login(&mut session),
        Commands::Logout => cmd_logout(&mut session),
        Commands::Preview { show, background, font, font_size, contrast, set, premium, at, json } =>
            cmd_preview(config, show, background, font, font_size, contrast, &set, premium, at, json),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}
