// Content area renderer
//
// Draws a ViewModel into a ratatui frame: the platform picker, the category
// list, the control list, or the loading / error / empty states.

use crate::checklist::ParsedControl;
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use crate::view::{
    CategoryCard, Renderer, ViewModel, EMPTY_CATEGORIES, LOAD_ERROR_HINT, REFERENCE_LABEL,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const HIGHLIGHT_SYMBOL: &str = "▶ ";

/// Cut `text` to at most `max` display columns, marking the cut with `…`
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Renders a view model into one area of a frame
pub struct FrameRenderer<'f, 'b> {
    frame: &'f mut Frame<'b>,
    area: Rect,
    theme: &'f Theme,
    accent: Color,
    cursor: usize,
}

impl<'f, 'b> FrameRenderer<'f, 'b> {
    pub fn new(
        frame: &'f mut Frame<'b>,
        area: Rect,
        theme: &'f Theme,
        accent: Color,
        cursor: usize,
    ) -> Self {
        Self {
            frame,
            area,
            theme,
            accent,
            cursor,
        }
    }

    fn block(&self, title: String) -> Block<'static> {
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_type(self.theme.border_type)
            .border_style(Style::default().fg(self.accent))
    }

    fn message(&mut self, title: String, lines: Vec<Line<'static>>) {
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(self.block(title));
        self.frame.render_widget(paragraph, self.area);
    }

    fn list(&mut self, area: Rect, title: String, items: Vec<ListItem<'static>>) {
        let list = List::new(items)
            .block(self.block(title))
            .highlight_style(self.theme.selected(self.accent))
            .highlight_symbol(HIGHLIGHT_SYMBOL);

        let mut state = ListState::default().with_selected(Some(self.cursor));
        self.frame.render_stateful_widget(list, area, &mut state);
    }

    /// Usable text width inside a bordered list
    fn inner_width(&self) -> usize {
        (self.area.width as usize).saturating_sub(2 + HIGHLIGHT_SYMBOL.width())
    }

    fn category_item(&self, card: &CategoryCard<'_>, name_width: usize) -> ListItem<'static> {
        let count = format!("{} controls", card.control_count);
        let room = self.inner_width().saturating_sub(count.width() + 2);
        let name = truncate(card.name, room.min(name_width));
        let fill = name_width.min(room).saturating_sub(name.width()) + 2;

        ListItem::new(Line::from(vec![
            Span::styled(name, Style::default().fg(self.theme.foreground)),
            Span::raw(" ".repeat(fill)),
            Span::styled(count, Style::default().fg(self.theme.muted)),
        ]))
    }

    fn control_item(&self, control: &ParsedControl, show_tags: bool) -> ListItem<'static> {
        let number = format!("{:>3}. ", control.index);
        let badge = match control.tag {
            Some(tag) if show_tags => Some((format!(" {} ", tag), self.theme.tag_color(tag))),
            _ => None,
        };
        let badge_width = badge.as_ref().map_or(0, |(b, _)| b.width() + 1);
        let room = self
            .inner_width()
            .saturating_sub(number.width() + badge_width);

        let mut spans = vec![
            Span::styled(number, Style::default().fg(self.accent)),
            Span::styled(
                truncate(&control.text, room),
                Style::default().fg(self.theme.foreground),
            ),
        ];
        if let Some((badge, color)) = badge {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                badge,
                Style::default()
                    .fg(self.theme.selection_fg)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        ListItem::new(Line::from(spans))
    }
}

impl Renderer for FrameRenderer<'_, '_> {
    fn render(&mut self, view: &ViewModel<'_>) {
        let title = view.title();

        match view {
            ViewModel::Platforms { platforms } => {
                let items = platforms
                    .iter()
                    .map(|p| {
                        ListItem::new(Span::styled(
                            p.to_uppercase(),
                            Style::default().fg(self.theme.accent_for(Some(p.as_str()))),
                        ))
                    })
                    .collect();
                self.list(self.area, title, items);
            }
            ViewModel::Loading { platform } => {
                let lines = vec![
                    Line::raw(""),
                    Line::styled(
                        format!("Loading {} checklist…", platform),
                        Style::default().fg(self.theme.muted),
                    ),
                ];
                self.message(title, lines);
            }
            ViewModel::Error { message, .. } => {
                let lines = vec![
                    Line::raw(""),
                    Line::styled(
                        "Error loading checklist data",
                        Style::default()
                            .fg(self.theme.error)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Line::styled(message.to_string(), Style::default().fg(self.theme.error)),
                    Line::raw(""),
                    Line::styled(LOAD_ERROR_HINT, Style::default().fg(self.theme.muted)),
                ];
                self.message(title, lines);
            }
            ViewModel::Categories { cards, .. } if cards.is_empty() => {
                let lines = vec![
                    Line::raw(""),
                    Line::styled(EMPTY_CATEGORIES, Style::default().fg(self.theme.muted)),
                ];
                self.message(title, lines);
            }
            ViewModel::Categories { cards, .. } => {
                let name_width = cards.iter().map(|c| c.name.width()).max().unwrap_or(0);
                let items = cards
                    .iter()
                    .map(|card| self.category_item(card, name_width))
                    .collect();
                self.list(self.area, title, items);
            }
            ViewModel::Controls {
                reference,
                controls,
                ..
            } => {
                let show_tags =
                    Breakpoint::from_width(self.area.width).at_least(Breakpoint::Normal);
                let items = controls
                    .iter()
                    .map(|control| self.control_item(control, show_tags))
                    .collect();

                let Some(url) = reference else {
                    self.list(self.area, title, items);
                    return;
                };

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(3)])
                    .split(self.area);

                let link = Paragraph::new(Line::from(vec![
                    Span::styled(
                        format!(" {} ", REFERENCE_LABEL),
                        Style::default().fg(self.accent),
                    ),
                    Span::styled(
                        url.to_string(),
                        Style::default()
                            .fg(self.theme.foreground)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]));
                self.frame.render_widget(link, chunks[0]);
                self.list(chunks[1], title, items);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::{ChecklistStore, NavigationState};
    use crate::view::LoadStatus;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("much too long", 8), "much to…");
    }

    #[test]
    fn test_renders_controls_with_tags() {
        let mut store = ChecklistStore::new();
        store
            .load(
                "web",
                r#"[{"name": "Authentication", "reference": "https://example.com/auth",
                     "controls": ["Use MFA [mandatory]", "Hash passwords"]}]"#,
            )
            .unwrap();
        let mut nav = NavigationState::new();
        nav.select_platform("web");
        nav.select_category("Authentication", &store).unwrap();
        let status = LoadStatus::Ready;
        let platforms = vec!["web".to_string()];
        let view = ViewModel::build(&nav, &store, &status, &platforms);

        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                FrameRenderer::new(f, area, &theme, Color::Blue, 0).render(&view);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("WEB › Authentication"));
        assert!(text.contains("View Reference Documentation →"));
        assert!(text.contains("1. Use MFA"));
        assert!(text.contains(" mandatory "));
        assert!(text.contains("2. Hash passwords"));
    }

    #[test]
    fn test_renders_empty_platform() {
        let mut store = ChecklistStore::new();
        store.load("api", "[]").unwrap();
        let mut nav = NavigationState::new();
        nav.select_platform("api");
        let status = LoadStatus::Ready;
        let platforms = vec!["api".to_string()];
        let view = ViewModel::build(&nav, &store, &status, &platforms);

        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(70, 6)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                FrameRenderer::new(f, area, &theme, Color::Blue, 0).render(&view);
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains(EMPTY_CATEGORIES));
    }
}
