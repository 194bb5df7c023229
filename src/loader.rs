// Background checklist loading with stale-response protection
//
// Each platform selection issues a fresh ticket. When a load completes, its
// result is applied only if the ticket is still the latest one issued and its
// platform is still the selected platform. Anything else is a response to a
// selection the user has already moved away from and is dropped.

use crate::events::{LoadEvent, LoadTicket};
use crate::source::ChecklistSource;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Issues load tickets and decides which completions are still current
#[derive(Debug, Default)]
pub struct LoadTracker {
    next_token: u64,
    pending: Option<LoadTicket>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new load, superseding any pending one
    pub fn issue(&mut self, platform: &str) -> LoadTicket {
        self.next_token += 1;
        let ticket = LoadTicket {
            platform: platform.to_string(),
            token: self.next_token,
        };
        self.pending = Some(ticket.clone());
        ticket
    }

    /// Forget the pending load (selection cleared)
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a completed load may be applied.
    ///
    /// Accepting consumes the pending ticket, so a duplicate completion for
    /// the same ticket is rejected.
    pub fn accept(&mut self, ticket: &LoadTicket, selected_platform: Option<&str>) -> bool {
        let current = self.pending.as_ref() == Some(ticket)
            && selected_platform == Some(ticket.platform.as_str());

        if current {
            self.pending = None;
        } else {
            tracing::debug!(
                "Discarding stale load for '{}' (token {})",
                ticket.platform,
                ticket.token
            );
        }
        current
    }
}

/// Spawn a fetch for the ticket's platform, reporting back on `tx`
pub fn spawn_load(
    source: Arc<ChecklistSource>,
    ticket: LoadTicket,
    tx: mpsc::Sender<LoadEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::debug!(
            "Loading platform '{}' from {} ({}, token {})",
            ticket.platform,
            source.location(),
            source.layout().as_str(),
            ticket.token
        );

        let event = match source.fetch(&ticket.platform).await {
            Ok(payload) => LoadEvent::Loaded { ticket, payload },
            Err(error) => LoadEvent::Failed { ticket, error },
        };

        // Receiver gone means the UI is shutting down
        let _ = tx.send(event).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceLayout;
    use std::time::Duration;

    #[test]
    fn test_tokens_are_monotonic() {
        let mut tracker = LoadTracker::new();
        let a = tracker.issue("web");
        let b = tracker.issue("web");
        assert!(b.token > a.token);
        assert_eq!(tracker.pending, Some(b));
    }

    #[test]
    fn test_accept_current_ticket_once() {
        let mut tracker = LoadTracker::new();
        let ticket = tracker.issue("web");

        assert!(tracker.accept(&ticket, Some("web")));
        assert!(tracker.pending.is_none());
        assert!(!tracker.accept(&ticket, Some("web")));
    }

    #[test]
    fn test_superseded_ticket_rejected() {
        let mut tracker = LoadTracker::new();
        let cloud = tracker.issue("cloud");
        let mobile = tracker.issue("mobile");

        assert!(!tracker.accept(&cloud, Some("mobile")));
        assert!(tracker.accept(&mobile, Some("mobile")));
    }

    #[test]
    fn test_reselecting_same_platform_supersedes_older_load() {
        let mut tracker = LoadTracker::new();
        let first = tracker.issue("web");
        let second = tracker.issue("web");

        assert!(!tracker.accept(&first, Some("web")));
        assert!(tracker.accept(&second, Some("web")));
    }

    #[test]
    fn test_platform_mismatch_rejected() {
        let mut tracker = LoadTracker::new();
        let ticket = tracker.issue("cloud");
        assert!(!tracker.accept(&ticket, Some("mobile")));
        assert!(!tracker.accept(&ticket, None));
    }

    #[test]
    fn test_cancel_rejects_in_flight() {
        let mut tracker = LoadTracker::new();
        let ticket = tracker.issue("web");
        tracker.cancel();
        assert!(!tracker.accept(&ticket, Some("web")));
    }

    #[tokio::test]
    async fn test_spawn_load_reports_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checklist.json");
        std::fs::write(&path, r#"{"web": [{"name": "A", "controls": []}]}"#).unwrap();

        let source = ChecklistSource::new(
            path.to_str().unwrap(),
            SourceLayout::Combined,
            Duration::from_secs(5),
        )
        .unwrap();

        let (tx, mut rx) = mpsc::channel(4);
        let mut tracker = LoadTracker::new();
        let ticket = tracker.issue("web");
        spawn_load(Arc::new(source), ticket.clone(), tx).await.unwrap();

        match rx.recv().await.unwrap() {
            LoadEvent::Loaded {
                ticket: got,
                payload,
            } => {
                assert_eq!(got, ticket);
                assert_eq!(payload[0]["name"], "A");
            }
            other => panic!("Expected Loaded event, got {:?}", other),
        }
    }
}
