// Status bar component
//
// Key hints for the current level on the left, loaded platforms on the right.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Key hints for the current navigation level
fn key_hints(app: &App, bp: Breakpoint) -> &'static str {
    let wide = bp.at_least(Breakpoint::Wide);
    match (app.nav.platform(), app.nav.category()) {
        (None, _) if wide => " ↑↓ move │ ⏎ open platform │ ? help │ q quit",
        (None, _) => " ↑↓ ⏎ │ ? │ q",
        (Some(_), None) if wide => {
            " ↑↓ move │ ⏎ open │ esc platforms │ y copy │ x csv │ r reload │ ? help │ q quit"
        }
        (Some(_), None) => " ↑↓ ⏎ esc │ y x r │ ? q",
        (Some(_), Some(_)) if wide => {
            " ↑↓ move │ esc categories │ y copy │ x csv │ r reload │ ? help │ q quit"
        }
        (Some(_), Some(_)) => " ↑↓ esc │ y x r │ ? q",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let style = Style::default().fg(app.theme.muted);

    let loaded = app.store.platforms();
    let loaded_text = if loaded.is_empty() || !bp.at_least(Breakpoint::Normal) {
        String::new()
    } else {
        format!("loaded: {} ", loaded.join(", "))
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(loaded_text.chars().count() as u16),
        ])
        .split(area);

    let hints = Paragraph::new(key_hints(app, bp))
        .style(style)
        .block(Block::default().borders(Borders::TOP));
    let platforms = Paragraph::new(loaded_text)
        .style(style)
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(hints, chunks[0]);
    f.render_widget(platforms, chunks[1]);
}
