// Title bar component
//
// App name, breadcrumb of the current selection and a spinner while a load
// is in flight.

use crate::tui::app::App;
use crate::view::LoadStatus;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn breadcrumb(app: &App) -> String {
    match (app.nav.platform(), app.nav.category()) {
        (None, _) => String::new(),
        (Some(platform), None) => format!(" ──── {}", platform.to_uppercase()),
        (Some(platform), Some(category)) => {
            format!(" ──── {} › {}", platform.to_uppercase(), category)
        }
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let accent = app.accent();

    let loading = if app.status == LoadStatus::Loading {
        format!(" {} loading", app.spinner_char())
    } else {
        String::new()
    };

    let title_text = format!(" 🛡  Security Checklist{}{}", breadcrumb(app), loading);

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(accent))
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}
