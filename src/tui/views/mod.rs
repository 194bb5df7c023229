// Views module - screen-level rendering
//
// Shell layout: title bar, content area, optional log panel, status bar.
// The content area is drawn from the app's ViewModel through FrameRenderer;
// the help modal and toast are drawn on top.

mod content;
mod help;

pub use content::FrameRenderer;

use super::app::App;
use super::components;
use super::layout::{logs_visible, LOG_PANEL_HEIGHT};
use super::modal::Modal;
use crate::view::Renderer;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let show_logs = logs_visible(area.height);
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(5)];
    if show_logs {
        constraints.push(Constraint::Length(LOG_PANEL_HEIGHT));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    components::render_title(f, chunks[0], app);

    let accent = app.accent();
    let view = app.view_model();
    FrameRenderer::new(f, chunks[1], &app.theme, accent, app.cursor).render(&view);

    if show_logs {
        components::render_logs_panel(f, chunks[2], app);
    }
    components::render_status(f, chunks[chunks.len() - 1], app);

    if let Some(Modal::Help) = app.modal {
        help::render(f, app);
    }

    if let Some(ref toast) = app.toast {
        toast.render(f, area, &app.theme, accent);
    }

    app.clear_expired_toast();
}
