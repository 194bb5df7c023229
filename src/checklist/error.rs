//! Error types for the checklist core.

use thiserror::Error;

/// Errors raised while loading a platform's checklist payload.
#[derive(Debug, Error)]
pub enum ChecklistError {
    /// Payload is not an array of `{ name, reference?, controls }` objects.
    #[error("malformed checklist data for platform '{platform}': {reason}")]
    DataFormat { platform: String, reason: String },

    /// Two categories in the same platform share a name.
    #[error("duplicate category '{name}' in platform '{platform}'")]
    DuplicateCategory { platform: String, name: String },
}

/// Rejected navigation transitions.
///
/// Both variants mean the caller offered a selection that the store does not
/// back, so they are programming errors rather than user-facing conditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("category '{name}' not found in platform '{platform}'")]
    CategoryNotFound { platform: String, name: String },

    #[error("no platform selected")]
    NoPlatformSelected,
}

/// Errors raised by the exporters.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export requested while nothing is selected.
    #[error("nothing selected to export")]
    NoSelection,

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}
