// View model and renderer seam
//
// `ViewModel::build` projects the navigation state, the store and the current
// load status into exactly what should be on screen. Renderers only draw a
// view model; they never look at navigation or the store themselves. The TUI
// draws through `tui::views::FrameRenderer`, the `show` command through
// `PlainRenderer` below.

use crate::checklist::export::COLUMN_WIDTHS;
use crate::checklist::parser::{self, ParsedControl};
use crate::checklist::{ChecklistStore, NavigationState, Selection};
use unicode_width::UnicodeWidthStr;

/// Progress of the load for the selected platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing in flight; data (if any) is current
    #[default]
    Ready,
    Loading,
    /// Last load failed; shown inline until the platform is selected again
    Failed(String),
}

/// Summary of a category for the category list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard<'a> {
    pub name: &'a str,
    pub control_count: usize,
}

/// Everything a renderer needs to draw the content area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModel<'a> {
    /// No platform selected: offer the configured platforms
    Platforms { platforms: &'a [String] },
    Loading { platform: &'a str },
    Error { platform: &'a str, message: &'a str },
    /// Platform selected; an empty card list is the "no categories" state
    Categories {
        platform: &'a str,
        cards: Vec<CategoryCard<'a>>,
    },
    Controls {
        platform: &'a str,
        category: &'a str,
        reference: Option<&'a str>,
        controls: Vec<ParsedControl>,
    },
}

impl<'a> ViewModel<'a> {
    pub fn build(
        nav: &'a NavigationState,
        store: &'a ChecklistStore,
        status: &'a LoadStatus,
        platforms: &'a [String],
    ) -> Self {
        if let Some(platform) = nav.platform() {
            match status {
                LoadStatus::Loading => return ViewModel::Loading { platform },
                LoadStatus::Failed(message) => return ViewModel::Error { platform, message },
                LoadStatus::Ready => {}
            }
        }

        match nav.resolve(store) {
            Selection::None => ViewModel::Platforms { platforms },
            Selection::Platform {
                platform,
                categories,
            } => ViewModel::Categories {
                platform,
                cards: categories
                    .iter()
                    .map(|c| CategoryCard {
                        name: &c.name,
                        control_count: c.control_count(),
                    })
                    .collect(),
            },
            Selection::Category { platform, category } => ViewModel::Controls {
                platform,
                category: &category.name,
                reference: category.reference.as_deref(),
                controls: parser::parse_all(&category.controls),
            },
        }
    }

    /// Number of selectable rows
    pub fn len(&self) -> usize {
        match self {
            ViewModel::Platforms { platforms } => platforms.len(),
            ViewModel::Categories { cards, .. } => cards.len(),
            ViewModel::Controls { controls, .. } => controls.len(),
            ViewModel::Loading { .. } | ViewModel::Error { .. } => 0,
        }
    }

    pub fn title(&self) -> String {
        match self {
            ViewModel::Platforms { .. } => "Select a platform".to_string(),
            ViewModel::Loading { platform }
            | ViewModel::Error { platform, .. }
            | ViewModel::Categories { platform, .. } => platform.to_uppercase(),
            ViewModel::Controls {
                platform, category, ..
            } => format!("{} › {}", platform.to_uppercase(), category),
        }
    }
}

pub const EMPTY_CATEGORIES: &str = "No categories available for this platform";
pub const LOAD_ERROR_HINT: &str = "Select the platform again to retry.";
pub const REFERENCE_LABEL: &str = "View Reference Documentation →";

/// Capability of drawing a view model
pub trait Renderer {
    fn render(&mut self, view: &ViewModel<'_>);
}

/// Renders a view model as plain text (headless `show` command)
#[derive(Debug, Default)]
pub struct PlainRenderer {
    out: String,
}

impl PlainRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }
}

/// Pad `text` with spaces to `width` display columns
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

impl Renderer for PlainRenderer {
    fn render(&mut self, view: &ViewModel<'_>) {
        self.line(&view.title());
        self.line("");

        match view {
            ViewModel::Platforms { platforms } => {
                for platform in platforms.iter() {
                    self.line(&format!("  {}", platform));
                }
            }
            ViewModel::Loading { .. } => self.line("Loading…"),
            ViewModel::Error { message, .. } => {
                self.line(&format!("Error loading checklist data: {}", message));
                self.line(LOAD_ERROR_HINT);
            }
            ViewModel::Categories { cards, .. } if cards.is_empty() => {
                self.line(EMPTY_CATEGORIES);
            }
            ViewModel::Categories { cards, .. } => {
                let width = cards
                    .iter()
                    .map(|c| c.name.width())
                    .max()
                    .unwrap_or(0)
                    .max(COLUMN_WIDTHS[1]);
                for card in cards {
                    self.line(&format!(
                        "  {}  {:>3} controls",
                        pad(card.name, width),
                        card.control_count
                    ));
                }
            }
            ViewModel::Controls {
                reference,
                controls,
                ..
            } => {
                if let Some(url) = reference {
                    self.line(&format!("{} {}", REFERENCE_LABEL, url));
                    self.line("");
                }
                for control in controls {
                    match control.tag {
                        Some(tag) => self.line(&format!(
                            "{:>4}. {}  [{}]",
                            control.index, control.text, tag
                        )),
                        None => self.line(&format!("{:>4}. {}", control.index, control.text)),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::Tag;

    fn store() -> ChecklistStore {
        let mut store = ChecklistStore::new();
        store
            .load(
                "web",
                r#"[{"name": "Authentication", "reference": "https://owasp.org/auth",
                     "controls": ["Use MFA [mandatory]", "Log failures"]},
                    {"name": "Session", "controls": ["Rotate IDs"]}]"#,
            )
            .unwrap();
        store.load("empty", "[]").unwrap();
        store
    }

    fn platforms() -> Vec<String> {
        vec!["web".to_string(), "empty".to_string()]
    }

    #[test]
    fn test_idle_lists_platforms() {
        let (store, platforms) = (store(), platforms());
        let nav = NavigationState::new();
        let status = LoadStatus::Ready;

        let view = ViewModel::build(&nav, &store, &status, &platforms);
        assert_eq!(view, ViewModel::Platforms { platforms: &platforms });
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_loading_and_error_take_precedence() {
        let (store, platforms) = (store(), platforms());
        let mut nav = NavigationState::new();
        nav.select_platform("web");

        let loading = LoadStatus::Loading;
        assert_eq!(
            ViewModel::build(&nav, &store, &loading, &platforms),
            ViewModel::Loading { platform: "web" }
        );

        let failed = LoadStatus::Failed("boom".to_string());
        let view = ViewModel::build(&nav, &store, &failed, &platforms);
        assert_eq!(
            view,
            ViewModel::Error {
                platform: "web",
                message: "boom"
            }
        );
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn test_categories_and_controls() {
        let (store, platforms) = (store(), platforms());
        let status = LoadStatus::Ready;
        let mut nav = NavigationState::new();
        nav.select_platform("web");

        match ViewModel::build(&nav, &store, &status, &platforms) {
            ViewModel::Categories { platform, cards } => {
                assert_eq!(platform, "web");
                assert_eq!(
                    cards,
                    vec![
                        CategoryCard {
                            name: "Authentication",
                            control_count: 2
                        },
                        CategoryCard {
                            name: "Session",
                            control_count: 1
                        },
                    ]
                );
            }
            other => panic!("Expected categories, got {:?}", other),
        }

        nav.select_category("Authentication", &store).unwrap();
        let view = ViewModel::build(&nav, &store, &status, &platforms);
        assert_eq!(view.title(), "WEB › Authentication");
        match view {
            ViewModel::Controls {
                reference,
                controls,
                ..
            } => {
                assert_eq!(reference, Some("https://owasp.org/auth"));
                assert_eq!(controls[0].text, "Use MFA");
                assert_eq!(controls[0].tag, Some(Tag::Mandatory));
                assert_eq!(controls[1].index, 2);
            }
            other => panic!("Expected controls, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_renderer_controls() {
        let (store, platforms) = (store(), platforms());
        let status = LoadStatus::Ready;
        let mut nav = NavigationState::new();
        nav.select_platform("web");
        nav.select_category("Authentication", &store).unwrap();

        let mut renderer = PlainRenderer::new();
        renderer.render(&ViewModel::build(&nav, &store, &status, &platforms));
        let out = renderer.into_string();

        assert!(out.starts_with("WEB › Authentication\n\n"));
        assert!(out.contains("View Reference Documentation → https://owasp.org/auth"));
        assert!(out.contains("   1. Use MFA  [mandatory]\n"));
        assert!(out.contains("   2. Log failures\n"));
    }

    #[test]
    fn test_plain_renderer_empty_platform() {
        let (store, platforms) = (store(), platforms());
        let status = LoadStatus::Ready;
        let mut nav = NavigationState::new();
        nav.select_platform("empty");

        let mut renderer = PlainRenderer::new();
        renderer.render(&ViewModel::build(&nav, &store, &status, &platforms));
        assert!(renderer.into_string().contains(EMPTY_CATEGORIES));
    }
}
