//! Logs panel component
//!
//! Shows the most recent entries of the in-memory log buffer, colour-coded
//! by level. Always follows the tail.

use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn level_style(level: LogLevel, theme: &Theme) -> Style {
    let color = match level {
        LogLevel::Error => theme.error,
        LogLevel::Warn => Color::Rgb(229, 192, 123),
        LogLevel::Info => theme.foreground,
        LogLevel::Debug | LogLevel::Trace => theme.muted,
    };
    Style::default().fg(color)
}

fn format_entry(entry: &LogEntry) -> String {
    format!(
        "{} {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    // Borders take two rows
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.tail(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(format_entry(entry)).style(level_style(entry.level, &app.theme)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Logs ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_entry() {
        let entry = LogEntry {
            timestamp: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap(),
            level: LogLevel::Warn,
            message: "Failed to load platform 'web'".to_string(),
        };
        assert_eq!(
            format_entry(&entry),
            "09:30:05 WARN  Failed to load platform 'web'"
        );
    }
}
