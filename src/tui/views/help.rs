// Help modal - keyboard shortcuts overlay

use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const SHORTCUTS: [(&str, &str); 9] = [
    ("↑ ↓  k j", "Move"),
    ("Home End", "First / last row"),
    ("Enter", "Open platform or category"),
    ("Esc ⌫", "Back one level"),
    ("y", "Copy selection as text"),
    ("x", "Export selection as CSV"),
    ("r", "Reload platform"),
    ("?", "Toggle help"),
    ("q", "Quit"),
];

/// Rect of `width` x `height` centered in `area`, clamped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}

pub fn render(f: &mut Frame, app: &App) {
    let accent = app.accent();
    let area = centered(f.area(), 46, SHORTCUTS.len() as u16 + 4);

    let mut lines = vec![Line::raw("")];
    lines.extend(SHORTCUTS.iter().map(|(keys, action)| {
        Line::from(vec![
            Span::styled(
                format!("  {:<10}", keys),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(*action, Style::default().fg(app.theme.foreground)),
        ])
    }));

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(app.theme.background)),
    );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
