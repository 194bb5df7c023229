// Application state for the TUI
//
// App owns the checklist store, the navigation state and the load tracker.
// Every user action is a method here; the event loop in tui/mod.rs only maps
// keys to these methods and hands completed loads to `apply_load_event`.

use super::clipboard::ClipboardSink;
use super::components::Toast;
use super::modal::Modal;
use super::theme::Theme;
use crate::checklist::{export, ChecklistStore, NavigationState};
use crate::config::Config;
use crate::events::{LoadEvent, LoadTicket};
use crate::loader::{self, LoadTracker};
use crate::logging::LogBuffer;
use crate::source::ChecklistSource;
use crate::view::{LoadStatus, ViewModel};
use ratatui::style::Color;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

pub struct App {
    pub store: ChecklistStore,
    pub nav: NavigationState,
    pub status: LoadStatus,

    /// Row under the cursor in the current list
    pub cursor: usize,
    /// Category row to restore when backing out of a category
    category_cursor: usize,

    /// Platforms offered in the picker, in display order
    pub platforms: Vec<String>,
    export_dir: PathBuf,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub should_quit: bool,

    pub log_buffer: LogBuffer,
    pub theme: Theme,
    animation_frame: usize,

    tracker: LoadTracker,
    in_flight: Option<JoinHandle<()>>,
    source: Arc<ChecklistSource>,
    load_tx: mpsc::Sender<LoadEvent>,
}

impl App {
    pub fn new(
        config: &Config,
        source: Arc<ChecklistSource>,
        load_tx: mpsc::Sender<LoadEvent>,
        log_buffer: LogBuffer,
    ) -> Self {
        Self {
            store: ChecklistStore::new(),
            nav: NavigationState::new(),
            status: LoadStatus::Ready,
            cursor: 0,
            category_cursor: 0,
            platforms: config.platforms.clone(),
            export_dir: config.export_dir.clone(),
            modal: None,
            toast: None,
            should_quit: false,
            log_buffer,
            theme: Theme::default(),
            animation_frame: 0,
            tracker: LoadTracker::new(),
            in_flight: None,
            source,
            load_tx,
        }
    }

    /// What the content area shows right now
    pub fn view_model(&self) -> ViewModel<'_> {
        ViewModel::build(&self.nav, &self.store, &self.status, &self.platforms)
    }

    /// Accent colour of the selected platform
    pub fn accent(&self) -> Color {
        self.theme.accent_for(self.nav.platform())
    }

    // ─────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────

    /// Select a platform and start loading its checklist
    pub fn select_platform(&mut self, key: &str) {
        if let Some(ticket) = self.request_platform(key) {
            self.in_flight = Some(loader::spawn_load(
                Arc::clone(&self.source),
                ticket,
                self.load_tx.clone(),
            ));
        }
    }

    /// Navigation and bookkeeping half of `select_platform`.
    ///
    /// Returns the ticket to load with, or None when the selection was
    /// cleared.
    fn request_platform(&mut self, key: &str) -> Option<LoadTicket> {
        self.abort_in_flight();
        self.nav.select_platform(key);
        self.cursor = 0;
        self.category_cursor = 0;

        let Some(platform) = self.nav.platform() else {
            self.tracker.cancel();
            self.status = LoadStatus::Ready;
            return None;
        };

        let ticket = self.tracker.issue(platform);
        self.status = LoadStatus::Loading;
        tracing::debug!(
            "Selected platform '{}' (previously loaded: {})",
            ticket.platform,
            self.store.is_loaded(&ticket.platform)
        );
        Some(ticket)
    }

    /// Apply a completed load, unless the user has moved on since it started
    pub fn apply_load_event(&mut self, event: LoadEvent) {
        if !self.tracker.accept(event.ticket(), self.nav.platform()) {
            return;
        }
        self.in_flight = None;

        match event {
            LoadEvent::Loaded { ticket, payload } => {
                match self.store.load_value(&ticket.platform, payload) {
                    Ok(()) => {
                        tracing::info!(
                            "Loaded {} categories for '{}'",
                            self.store.categories_for(&ticket.platform).len(),
                            ticket.platform
                        );
                        self.status = LoadStatus::Ready;
                        self.clamp_cursor();
                    }
                    Err(e) => {
                        tracing::warn!("Rejected checklist data: {}", e);
                        self.status = LoadStatus::Failed(e.to_string());
                    }
                }
            }
            LoadEvent::Failed { ticket, error } => {
                tracing::warn!("Failed to load platform '{}': {}", ticket.platform, error);
                self.status = LoadStatus::Failed(error.to_string());
            }
        }
    }

    /// Keep the cursor inside the list that fresh data produced.
    ///
    /// Loads are only accepted at the category list (`request_platform`
    /// closes any open category), so only the cursor can go out of range.
    fn clamp_cursor(&mut self) {
        let len = self.view_model().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Reload the selected platform
    pub fn reload(&mut self) {
        match self.nav.platform().map(str::to_string) {
            Some(platform) => self.select_platform(&platform),
            None => self.show_toast("Select a platform first"),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.view_model().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn move_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.cursor = self.view_model().len().saturating_sub(1);
    }

    /// Drill into the row under the cursor
    pub fn enter(&mut self) {
        if self.nav.is_idle() {
            if let Some(platform) = self.platforms.get(self.cursor).cloned() {
                self.select_platform(&platform);
            }
            return;
        }

        if self.nav.category().is_some() || self.status != LoadStatus::Ready {
            return;
        }

        let Some(name) = self
            .nav
            .platform()
            .and_then(|p| self.store.categories_for(p).get(self.cursor))
            .map(|c| c.name.clone())
        else {
            return;
        };

        match self.nav.select_category(&name, &self.store) {
            Ok(()) => {
                self.category_cursor = self.cursor;
                self.cursor = 0;
            }
            Err(e) => tracing::warn!("Navigation rejected: {}", e),
        }
    }

    /// Go up one level: controls → categories → platform picker
    pub fn back(&mut self) {
        if self.nav.category().is_some() {
            self.nav.back_to_categories();
            self.cursor = self.category_cursor;
            return;
        }

        if let Some(platform) = self.nav.platform().map(str::to_string) {
            self.abort_in_flight();
            self.tracker.cancel();
            self.nav.reset();
            self.status = LoadStatus::Ready;
            self.cursor = self
                .platforms
                .iter()
                .position(|p| *p == platform)
                .unwrap_or(0);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────

    /// Why exporting is not possible right now, if it isn't
    fn export_blocker(&self) -> Option<&'static str> {
        if self.nav.is_idle() {
            return Some("Select a platform first");
        }
        match self.status {
            LoadStatus::Ready => None,
            LoadStatus::Loading => Some("Still loading…"),
            LoadStatus::Failed(_) => Some("Nothing loaded to export"),
        }
    }

    /// Copy the selection as plain text
    pub fn copy_selection(&mut self, clipboard: &mut impl ClipboardSink) {
        if let Some(hint) = self.export_blocker() {
            self.show_toast(hint);
            return;
        }

        let text = match export::to_plain_text(&self.nav, &self.store) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Copy failed: {}", e);
                self.show_toast("✗ Nothing to copy");
                return;
            }
        };

        match clipboard.set_text(&text) {
            Ok(()) => self.show_toast("✓ Copied to clipboard"),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.show_toast("✗ Failed to copy");
            }
        }
    }

    /// Write the selection as CSV into the export directory
    pub fn export_csv(&mut self) {
        if let Some(hint) = self.export_blocker() {
            self.show_toast(hint);
            return;
        }

        match export::write_table(&self.nav, &self.store, &self.export_dir) {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.show_toast(format!("✓ Saved {}", name));
            }
            Err(e) => {
                tracing::warn!("CSV export failed: {}", e);
                self.show_toast("✗ Export failed");
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Overlays and animation
    // ─────────────────────────────────────────────────────────────

    pub fn show_help(&mut self) {
        self.modal = Some(Modal::Help);
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}
