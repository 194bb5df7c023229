// Events that flow from background load tasks to the UI loop
//
// Every load carries the ticket it was issued with so the receiver can tell a
// current response from a stale one. See `loader::LoadTracker`.

use crate::source::SourceError;
use serde_json::Value;

/// Identifies one load request: the platform asked for and a monotonic token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub platform: String,
    pub token: u64,
}

/// Completion of a background checklist load
#[derive(Debug)]
pub enum LoadEvent {
    /// Raw category array fetched for the ticket's platform
    Loaded { ticket: LoadTicket, payload: Value },

    /// Fetch failed (I/O, network, HTTP status or malformed document)
    Failed { ticket: LoadTicket, error: SourceError },
}

impl LoadEvent {
    pub fn ticket(&self) -> &LoadTicket {
        match self {
            LoadEvent::Loaded { ticket, .. } | LoadEvent::Failed { ticket, .. } => ticket,
        }
    }
}
