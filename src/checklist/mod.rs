//! Checklist core
//!
//! Platform → category → control data and the logic that sits on top of it.
//! Nothing in here knows about terminals, files or the network apart from
//! the CSV writer in [`export`]:
//!
//! - [`store`]: loaded categories per platform
//! - [`parser`]: inline `[tag]` extraction for control strings
//! - [`navigation`]: the platform/category cursor
//! - [`export`]: plain-text and tabular serializers

pub mod error;
pub mod export;
pub mod navigation;
pub mod parser;
pub mod store;

pub use error::{ChecklistError, ExportError, NavigationError};
pub use navigation::{NavigationState, Selection};
pub use parser::{ParsedControl, Tag};
pub use store::{Category, ChecklistStore};
