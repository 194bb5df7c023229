// CLI module - command-line argument parsing and headless handlers
//
// With no subcommand the TUI runs. Subcommands:
// - show:   load one platform and print the selection as text
// - export: write the selection as plain text (stdout) or CSV (file)
// - config: show, locate or reset the config file

use crate::checklist::{export, ChecklistStore, NavigationState};
use crate::config::{Config, VERSION};
use crate::source::ChecklistSource;
use crate::view::{LoadStatus, PlainRenderer, Renderer, ViewModel};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// seccheck - Security checklist browser
#[derive(Parser)]
#[command(name = "seccheck")]
#[command(version = VERSION)]
#[command(about = "Browse and export security control checklists", long_about = None)]
pub struct Cli {
    /// Platform to open on startup (TUI only)
    #[arg(long, short)]
    pub platform: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a platform's categories, or one category's controls
    Show {
        #[arg(long, short)]
        platform: String,

        #[arg(long, short)]
        category: Option<String>,
    },

    /// Export the selection as text or CSV
    Export {
        #[arg(long, short)]
        platform: String,

        #[arg(long, short)]
        category: Option<String>,

        #[arg(long, short, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,

        /// Output directory for CSV (defaults to export_dir from config)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Plain text to stdout
    Text,
    /// CSV file
    Csv,
}

/// Load one platform and navigate to the requested selection
async fn load_selection(
    config: &Config,
    platform: &str,
    category: Option<&str>,
) -> Result<(ChecklistStore, NavigationState)> {
    let source = ChecklistSource::new(
        &config.source,
        config.layout,
        Duration::from_secs(config.fetch_timeout_secs),
    )?;

    let payload = source
        .fetch(platform)
        .await
        .with_context(|| format!("Failed to load platform '{}'", platform))?;

    let mut store = ChecklistStore::new();
    store
        .load_value(platform, payload)
        .with_context(|| format!("Invalid checklist data for '{}'", platform))?;

    let mut nav = NavigationState::new();
    nav.select_platform(platform);
    if let Some(name) = category {
        nav.select_category(name, &store)?;
    }

    tracing::debug!("Headless selection: {:?}", nav);
    Ok((store, nav))
}

pub async fn handle_show(config: &Config, platform: &str, category: Option<&str>) -> Result<()> {
    let (store, nav) = load_selection(config, platform, category).await?;
    let status = LoadStatus::Ready;

    let mut renderer = PlainRenderer::new();
    renderer.render(&ViewModel::build(&nav, &store, &status, &config.platforms));
    print!("{}", renderer.into_string());
    Ok(())
}

pub async fn handle_export(
    config: &Config,
    platform: &str,
    category: Option<&str>,
    format: ExportFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let (store, nav) = load_selection(config, platform, category).await?;

    match format {
        ExportFormat::Text => print!("{}", export::to_plain_text(&nav, &store)?),
        ExportFormat::Csv => {
            let dir = out.unwrap_or_else(|| config.export_dir.clone());
            let path = export::write_table(&nav, &store, &dir)
                .with_context(|| format!("Failed to write export into {}", dir.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show();
        Ok(())
    } else if reset {
        handle_config_reset()
    } else {
        // No flag provided, show help
        println!("Usage: seccheck config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("source = {:?}", config.source);
    println!("layout = {:?}", config.layout.as_str());
    println!("platforms = {:?}", config.platforms);
    println!("export_dir = {:?}", config.export_dir.display().to_string());
    println!("fetch_timeout_secs = {}", config.fetch_timeout_secs);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!(
        "file_dir = {:?}",
        config.logging.file_dir.display().to_string()
    );
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default()
        .save()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
