//! In-memory checklist store
//!
//! Holds the categories of every loaded platform. Data for a platform is only
//! ever replaced wholesale by `load`; there are no per-category mutations.

use super::error::ChecklistError;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// A named group of controls within a platform
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub controls: Vec<String>,
}

impl Category {
    pub fn control_count(&self) -> usize {
        self.controls.len()
    }
}

/// Loaded checklist data keyed by platform
#[derive(Debug, Default)]
pub struct ChecklistStore {
    platforms: HashMap<String, Vec<Category>>,
}

impl ChecklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw JSON payload and replace the platform's categories.
    ///
    /// On error the previously loaded data for `platform` is left untouched.
    pub fn load(&mut self, platform: &str, raw_json: &str) -> Result<(), ChecklistError> {
        let categories: Vec<Category> =
            serde_json::from_str(raw_json).map_err(|e| ChecklistError::DataFormat {
                platform: platform.to_string(),
                reason: e.to_string(),
            })?;
        self.insert(platform, categories)
    }

    /// Same as [`load`](Self::load) for an already parsed document
    pub fn load_value(
        &mut self,
        platform: &str,
        value: serde_json::Value,
    ) -> Result<(), ChecklistError> {
        let categories: Vec<Category> =
            serde_json::from_value(value).map_err(|e| ChecklistError::DataFormat {
                platform: platform.to_string(),
                reason: e.to_string(),
            })?;
        self.insert(platform, categories)
    }

    fn insert(&mut self, platform: &str, categories: Vec<Category>) -> Result<(), ChecklistError> {
        let mut seen = HashSet::with_capacity(categories.len());
        for category in &categories {
            if !seen.insert(category.name.as_str()) {
                return Err(ChecklistError::DuplicateCategory {
                    platform: platform.to_string(),
                    name: category.name.clone(),
                });
            }
        }

        self.platforms.insert(platform.to_string(), categories);
        Ok(())
    }

    /// Categories for a platform, empty when the platform is not loaded yet
    pub fn categories_for(&self, platform: &str) -> &[Category] {
        self.platforms
            .get(platform)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up a single category by name
    pub fn category(&self, platform: &str, name: &str) -> Option<&Category> {
        self.categories_for(platform).iter().find(|c| c.name == name)
    }

    pub fn is_loaded(&self, platform: &str) -> bool {
        self.platforms.contains_key(platform)
    }

    /// Loaded platform keys, sorted
    pub fn platforms(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.platforms.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEB: &str = r#"[
        {"name": "Authentication", "reference": "https://owasp.org/auth", "controls": ["a", "b [basic]"]},
        {"name": "Session", "controls": ["c"]}
    ]"#;

    #[test]
    fn test_load_and_lookup() {
        let mut store = ChecklistStore::new();
        store.load("web", WEB).unwrap();

        let categories = store.categories_for("web");
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Authentication");
        assert_eq!(
            categories[0].reference.as_deref(),
            Some("https://owasp.org/auth")
        );
        assert_eq!(categories[1].reference, None);
        assert_eq!(store.category("web", "Session").unwrap().control_count(), 1);
        assert!(store.is_loaded("web"));
    }

    #[test]
    fn test_unknown_platform_is_empty() {
        let store = ChecklistStore::new();
        assert!(store.categories_for("cloud").is_empty());
        assert!(store.category("cloud", "anything").is_none());
        assert!(!store.is_loaded("cloud"));
    }

    #[test]
    fn test_load_replaces_previous_data() {
        let mut store = ChecklistStore::new();
        store.load("web", WEB).unwrap();
        store
            .load("web", r#"[{"name": "Only", "controls": []}]"#)
            .unwrap();

        let categories = store.categories_for("web");
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Only");
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        let mut store = ChecklistStore::new();
        let bad = [
            r#"{"name": "not an array", "controls": []}"#,
            r#"[{"controls": ["missing name"]}]"#,
            r#"[{"name": "missing controls"}]"#,
            r#"[{"name": "wrong type", "controls": [1, 2]}]"#,
            r#"[{"name": 7, "controls": []}]"#,
            "not json",
        ];

        for payload in bad {
            let err = store.load("web", payload).unwrap_err();
            assert!(
                matches!(err, ChecklistError::DataFormat { .. }),
                "expected DataFormat for {payload}, got {err:?}"
            );
        }
        assert!(!store.is_loaded("web"));
    }

    #[test]
    fn test_failed_load_keeps_previous_data() {
        let mut store = ChecklistStore::new();
        store.load("web", WEB).unwrap();
        assert!(store.load("web", "[1]").is_err());
        assert_eq!(store.categories_for("web").len(), 2);
    }

    #[test]
    fn test_duplicate_category_names_rejected() {
        let mut store = ChecklistStore::new();
        let err = store
            .load(
                "web",
                r#"[{"name": "A", "controls": []}, {"name": "A", "controls": ["x"]}]"#,
            )
            .unwrap_err();

        match err {
            ChecklistError::DuplicateCategory { platform, name } => {
                assert_eq!(platform, "web");
                assert_eq!(name, "A");
            }
            other => panic!("Expected DuplicateCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_load_value_and_platform_listing() {
        let mut store = ChecklistStore::new();
        store
            .load_value("mobile", serde_json::json!([{"name": "M", "controls": ["x"]}]))
            .unwrap();
        store.load("cloud", "[]").unwrap();

        assert_eq!(store.platforms(), vec!["cloud", "mobile"]);
        assert!(store.categories_for("cloud").is_empty());
        assert!(store.is_loaded("cloud"));
    }
}
