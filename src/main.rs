//! srefs-tui - A terminal browser for Midjourney style reference codes
//!
//! This is the main entry point for the srefs-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::{BrowseState, Locale};
use crate::services::{bundled_catalog, load_catalog, ClipboardService, SystemClipboard};
use crate::tui::{Tui, TuiEvent};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Browse, filter and copy Midjourney sref codes
#[derive(Parser, Debug)]
#[command(name = "srefs-tui", version, about)]
struct Cli {
    /// Catalog file to browse (.json, .yaml or .yml) instead of the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Language for names, categories and tags
    #[arg(long, value_enum)]
    locale: Option<Locale>,

    /// Print the schema.org ItemList for the catalog and exit
    #[arg(long)]
    export_json_ld: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let _log_guard = logging::init(&config);
    if let Some(e) = config_error {
        tracing::warn!(error = %format!("{:#}", e), "using default config");
    }

    // Command line wins over the config file
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }

    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(path, config.locale),
        None => bundled_catalog(config.locale),
    }
    .context("Failed to load style catalog")?;

    if cli.export_json_ld {
        let json = serde_json::to_string_pretty(&services::structured_data::item_list(&catalog))?;
        println!("{}", json);
        return Ok(());
    }

    if catalog.is_empty() {
        tracing::warn!("catalog has no styles");
    }
    tracing::info!(
        styles = catalog.len(),
        locale = catalog.locale.code(),
        "starting browser"
    );

    let browse = BrowseState::new(&catalog).with_preferences(config.default_sort, config.default_view);
    let clipboard = ClipboardService::spawn(SystemClipboard::default);
    let mut app = App::new(catalog, browse, clipboard);

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = %format!("{:#}", err), "exited with error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            Some(TuiEvent::Key(key)) => app.handle_key_event(key)?,
            Some(TuiEvent::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(TuiEvent::Tick) => Some(Action::Tick),
            None => None,
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
