// seccheck - Security checklist browser
//
// Drill-down browser for security control checklists, organised as
// platform → category → control, with plain-text and CSV export of whatever
// is currently selected.
//
// Architecture:
// - Checklist core: store, tag parser, navigation state machine, exporters
// - Source: reads checklist documents from disk or over HTTP (reqwest)
// - Loader: background loads with stale-response protection
// - View: projects navigation + store into a ViewModel drawn by a Renderer
// - TUI (ratatui): interactive browser; CLI: headless show/export

mod checklist;
mod cli;
mod config;
mod events;
mod loader;
mod logging;
mod source;
mod tui;
mod view;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use logging::{LogBuffer, LogTarget};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands run before the config file is loaded, so --reset can
    // repair a file that no longer parses
    if let Some(Commands::Config { show, reset, path }) = cli.command {
        return cli::handle_config(show, reset, path);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();

    // In TUI mode logs go to the in-memory buffer shown in the log panel;
    // headless commands log to stderr so stdout stays clean for output
    let log_buffer = LogBuffer::new();
    let target = if cli.command.is_none() {
        LogTarget::Tui
    } else {
        LogTarget::Stderr
    };
    let _file_guard = logging::init(&config.logging, target, &log_buffer);

    tracing::info!(
        "seccheck v{} using {} ({})",
        config::VERSION,
        config.source,
        config.layout.as_str()
    );

    match cli.command {
        Some(Commands::Show { platform, category }) => {
            cli::handle_show(&config, &platform, category.as_deref()).await
        }
        Some(Commands::Export {
            platform,
            category,
            format,
            out,
        }) => cli::handle_export(&config, &platform, category.as_deref(), format, out).await,
        Some(Commands::Config { .. }) => Ok(()),
        None => tui::run_tui(config, log_buffer, cli.platform).await,
    }
}
