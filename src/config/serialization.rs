//! Config serialization to TOML
//!
//! Single source of truth for the config file format. `ensure_config_exists`,
//! `config --reset` and the round-trip tests all go through `to_toml`.

use super::Config;

impl Config {
    /// Serialize config to a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# seccheck configuration

# Checklist data: a file path or an http(s) URL
source = {source:?}

# Document layout at the source:
#   "combined"     - one JSON object keyed by platform (e.g. checklist.json)
#   "per_platform" - one JSON array per platform at <source>/<platform>.json
layout = "{layout}"

# Platforms offered in the picker, in display order
platforms = {platforms:?}

# Directory CSV exports are written to
export_dir = {export_dir:?}

# Timeout for remote sources (seconds)
fetch_timeout_secs = {timeout}

# Logging configuration (RUST_LOG env var overrides the level)
[logging]
level = "{level}"
file_enabled = {file_enabled}
file_dir = {file_dir:?}
file_rotation = "{rotation}"
file_prefix = {prefix:?}
"#,
            source = self.source,
            layout = self.layout.as_str(),
            platforms = self.platforms,
            export_dir = self.export_dir.display().to_string(),
            timeout = self.fetch_timeout_secs,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string(),
            rotation = self.logging.file_rotation.as_str(),
            prefix = self.logging.file_prefix,
        )
    }

    /// Save current configuration to the config file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}
