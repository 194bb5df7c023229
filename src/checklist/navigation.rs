//! Navigation state machine
//!
//! Tracks where the user is in the platform → category → control hierarchy:
//!
//! ```text
//!            select_platform(key)            select_category(name)
//!   Idle ─────────────────────────▶ Platform ─────────────────────▶ Category
//!    ▲                               ▲   ▲                             │
//!    │ reset() / select_platform("") │   └──── back_to_categories() ───┘
//!    └───────────────────────────────┴─ select_platform(other) from any state
//! ```
//!
//! The state is a plain value owned by whoever drives the UI. Categories are
//! referenced by name, which the store guarantees unique per platform.

use super::error::NavigationError;
use super::store::{Category, ChecklistStore};

/// Cursor over the checklist hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavigationState {
    /// Nothing selected (initial state)
    #[default]
    Idle,
    /// A platform is selected, showing its categories
    PlatformSelected { platform: String },
    /// A category of the selected platform is open, showing its controls
    CategorySelected { platform: String, category: String },
}

/// The data currently in view, borrowed from the store
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    None,
    Platform {
        platform: &'a str,
        categories: &'a [Category],
    },
    Category {
        platform: &'a str,
        category: &'a Category,
    },
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a platform, clearing any open category. An empty or
    /// whitespace-only key resets; any other key is kept exactly as given.
    pub fn select_platform(&mut self, key: &str) {
        *self = if key.trim().is_empty() {
            NavigationState::Idle
        } else {
            NavigationState::PlatformSelected {
                platform: key.to_string(),
            }
        };
    }

    /// Open a category of the current platform.
    ///
    /// The name must be one of `store.categories_for(platform)`; otherwise the
    /// state is left unchanged and an error is returned.
    pub fn select_category(
        &mut self,
        name: &str,
        store: &ChecklistStore,
    ) -> Result<(), NavigationError> {
        let platform = self
            .platform()
            .ok_or(NavigationError::NoPlatformSelected)?
            .to_string();

        if store.category(&platform, name).is_none() {
            return Err(NavigationError::CategoryNotFound {
                platform,
                name: name.to_string(),
            });
        }

        *self = NavigationState::CategorySelected {
            platform,
            category: name.to_string(),
        };
        Ok(())
    }

    /// Close the open category, keeping the platform. No-op otherwise.
    pub fn back_to_categories(&mut self) {
        if let NavigationState::CategorySelected { platform, .. } = self {
            *self = NavigationState::PlatformSelected {
                platform: std::mem::take(platform),
            };
        }
    }

    pub fn reset(&mut self) {
        *self = NavigationState::Idle;
    }

    pub fn platform(&self) -> Option<&str> {
        match self {
            NavigationState::Idle => None,
            NavigationState::PlatformSelected { platform }
            | NavigationState::CategorySelected { platform, .. } => Some(platform),
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            NavigationState::CategorySelected { category, .. } => Some(category),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, NavigationState::Idle)
    }

    /// Resolve the selection against the store.
    ///
    /// A category that no longer exists (the platform was reloaded with
    /// different data) resolves to the platform-level view.
    pub fn resolve<'a>(&'a self, store: &'a ChecklistStore) -> Selection<'a> {
        match self {
            NavigationState::Idle => Selection::None,
            NavigationState::PlatformSelected { platform } => Selection::Platform {
                platform,
                categories: store.categories_for(platform),
            },
            NavigationState::CategorySelected { platform, category } => {
                match store.category(platform, category) {
                    Some(category) => Selection::Category { platform, category },
                    None => Selection::Platform {
                        platform,
                        categories: store.categories_for(platform),
                    },
                }
            }
        }
    }
}
