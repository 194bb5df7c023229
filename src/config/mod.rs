//! Configuration for the checklist browser
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/seccheck/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::source::SourceLayout;
use serde::Deserialize;
use std::path::PathBuf;

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{FileLogging, LogRotation, LoggingConfig};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Platforms offered in the picker when none are configured
pub const DEFAULT_PLATFORMS: [&str; 5] = ["web", "mobile", "cloud", "network", "api"];

const DEFAULT_SOURCE: &str = "checklist.json";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Checklist data location: file path or http(s) URL
    pub source: String,

    /// Document layout at the source
    pub layout: SourceLayout,

    /// Platform keys offered for selection, in display order
    pub platforms: Vec<String>,

    /// Directory CSV exports are written to
    pub export_dir: PathBuf,

    /// HTTP timeout for remote sources
    pub fetch_timeout_secs: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            layout: SourceLayout::default(),
            platforms: DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect(),
            export_dir: PathBuf::from("."),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            logging: LoggingConfig::default(),
        }
    }
}

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub source: Option<String>,
    pub layout: Option<String>,
    pub platforms: Option<Vec<String>>,
    pub export_dir: Option<String>,
    pub fetch_timeout_secs: Option<u64>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/seccheck/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("seccheck").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists.
    ///
    /// A config file that exists but cannot be read or parsed is fatal: the
    /// process exits with the parse error rather than running on defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\nCONFIG ERROR - Failed to parse configuration file\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run `seccheck config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\nCONFIG ERROR - Cannot read configuration file\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let source = env("SECCHECK_SOURCE")
            .or(file.source)
            .unwrap_or(defaults.source);

        let layout = env("SECCHECK_LAYOUT")
            .or(file.layout)
            .map(|s| SourceLayout::from_str(&s))
            .unwrap_or(defaults.layout);

        // Comma separated in the environment, a TOML array in the file
        let platforms = env("SECCHECK_PLATFORMS")
            .map(|v| v.split(',').map(|p| p.trim().to_string()).collect())
            .or(file.platforms)
            .map(|list: Vec<String>| {
                list.into_iter()
                    .filter(|p| !p.trim().is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.platforms);

        let export_dir = env("SECCHECK_EXPORT_DIR")
            .or(file.export_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        let fetch_timeout_secs = env("SECCHECK_FETCH_TIMEOUT")
            .and_then(|v| v.parse().ok())
            .or(file.fetch_timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.fetch_timeout_secs);

        // RUST_LOG is handled where the subscriber is built
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            source,
            layout,
            platforms,
            export_dir,
            fetch_timeout_secs,
            logging,
        }
    }
}
