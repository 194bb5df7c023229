//! Checklist data sources
//!
//! A source is a filesystem path or an http(s) URL. Two document layouts are
//! supported:
//!
//! - `combined`: one JSON object keyed by platform, each value an array of
//!   categories (`checklist.json`)
//! - `per_platform`: one JSON array per platform at `<source>/<platform>.json`
//!
//! Either way `fetch(platform)` yields that platform's category array, ready
//! for `ChecklistStore::load_value`.

use crate::checklist::ChecklistError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// How checklist documents are laid out at the source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceLayout {
    /// One document keyed by platform (default)
    #[default]
    Combined,
    /// One document per platform
    PerPlatform,
}

impl SourceLayout {
    /// Parse layout string from config, defaulting to combined
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().replace('-', "_").as_str() {
            "per_platform" => Self::PerPlatform,
            _ => Self::Combined,
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Combined => "combined",
            Self::PerPlatform => "per_platform",
        }
    }
}

/// Where a document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Url(String),
}

impl Location {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Location::Url(source.to_string())
        } else {
            Location::File(PathBuf::from(source))
        }
    }

    /// Location of a platform's own document under this base
    fn platform_document(&self, platform: &str) -> Self {
        match self {
            Location::File(dir) => Location::File(dir.join(format!("{}.json", platform))),
            Location::Url(base) => {
                Location::Url(format!("{}/{}.json", base.trim_end_matches('/'), platform))
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Url(url) => f.write_str(url),
        }
    }
}

/// Failures while fetching checklist data
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON in {location}: {source}")]
    Json {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Format(#[from] ChecklistError),
}

/// Fetches per-platform category payloads
#[derive(Debug, Clone)]
pub struct ChecklistSource {
    location: Location,
    layout: SourceLayout,
    client: reqwest::Client,
}

impl ChecklistSource {
    pub fn new(source: &str, layout: SourceLayout, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            location: Location::parse(source),
            layout,
            client,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn layout(&self) -> SourceLayout {
        self.layout
    }

    /// Fetch the category array for one platform.
    ///
    /// In the combined layout a platform missing from the document yields an
    /// empty array; that is the "no categories" state, not an error.
    pub async fn fetch(&self, platform: &str) -> Result<Value, SourceError> {
        match self.layout {
            SourceLayout::PerPlatform => {
                let location = self.location.platform_document(platform);
                self.read_json(&location).await
            }
            SourceLayout::Combined => {
                let document = self.read_json(&self.location).await?;
                let Value::Object(mut platforms) = document else {
                    return Err(ChecklistError::DataFormat {
                        platform: platform.to_string(),
                        reason: format!(
                            "{} is not an object keyed by platform",
                            self.location
                        ),
                    }
                    .into());
                };
                Ok(platforms
                    .remove(platform)
                    .unwrap_or_else(|| Value::Array(Vec::new())))
            }
        }
    }

    async fn read_json(&self, location: &Location) -> Result<Value, SourceError> {
        let body = self.read(location).await?;
        serde_json::from_str(&body).map_err(|source| SourceError::Json {
            location: location.to_string(),
            source,
        })
    }

    async fn read(&self, location: &Location) -> Result<String, SourceError> {
        match location {
            Location::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SourceError::Io {
                        path: path.clone(),
                        source,
                    })
            }
            Location::Url(url) => {
                let http_err = |source| SourceError::Http {
                    url: url.clone(),
                    source,
                };

                let response = self.client.get(url).send().await.map_err(http_err)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                response.text().await.map_err(http_err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn source(path: &std::path::Path, layout: SourceLayout) -> ChecklistSource {
        ChecklistSource::new(path.to_str().unwrap(), layout, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!(SourceLayout::from_str("combined"), SourceLayout::Combined);
        assert_eq!(SourceLayout::from_str("per_platform"), SourceLayout::PerPlatform);
        assert_eq!(SourceLayout::from_str("Per-Platform"), SourceLayout::PerPlatform);
        assert_eq!(SourceLayout::from_str("bogus"), SourceLayout::Combined);
        assert_eq!(SourceLayout::PerPlatform.as_str(), "per_platform");
    }

    #[test]
    fn test_location_parse() {
        assert_eq!(
            Location::parse("https://example.com/data"),
            Location::Url("https://example.com/data".to_string())
        );
        assert_eq!(
            Location::parse("./checklist.json"),
            Location::File(PathBuf::from("./checklist.json"))
        );
        assert_eq!(
            Location::parse("https://example.com/data/").platform_document("web"),
            Location::Url("https://example.com/data/web.json".to_string())
        );
    }

    #[tokio::test]
    async fn test_combined_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checklist.json");
        fs::write(
            &path,
            r#"{"web": [{"name": "A", "controls": ["x"]}], "cloud": []}"#,
        )
        .unwrap();

        let source = source(&path, SourceLayout::Combined);
        let web = source.fetch("web").await.unwrap();
        assert_eq!(web[0]["name"], "A");

        // Missing platform is an empty list
        let mobile = source.fetch("mobile").await.unwrap();
        assert_eq!(mobile, Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn test_combined_layout_requires_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checklist.json");
        fs::write(&path, "[]").unwrap();

        let err = source(&path, SourceLayout::Combined)
            .fetch("web")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SourceError::Format(ChecklistError::DataFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_per_platform_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("cloud.json"),
            r#"[{"name": "IAM", "controls": ["Least privilege [mandatory]"]}]"#,
        )
        .unwrap();

        let source = source(dir.path(), SourceLayout::PerPlatform);
        let cloud = source.fetch("cloud").await.unwrap();
        assert_eq!(cloud[0]["name"], "IAM");

        let err = source.fetch("web").await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checklist.json");
        fs::write(&path, "{ not json").unwrap();

        let err = source(&path, SourceLayout::Combined)
            .fetch("web")
            .await
            .unwrap_err();
        match err {
            SourceError::Json { location, .. } => assert!(location.ends_with("checklist.json")),
            other => panic!("Expected Json error, got {:?}", other),
        }
    }
}
