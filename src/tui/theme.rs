// Theme for the TUI
//
// Base colours plus a per-platform accent: each platform gets its own accent
// colour for borders, the title and the selection highlight, and tags get a
// fixed colour each in the control list.

use crate::checklist::Tag;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Accents for the built-in platform keys
const PLATFORM_ACCENTS: [(&str, Color); 5] = [
    ("web", Color::Rgb(97, 175, 239)),
    ("mobile", Color::Rgb(152, 195, 121)),
    ("cloud", Color::Rgb(86, 182, 194)),
    ("network", Color::Rgb(198, 120, 221)),
    ("api", Color::Rgb(229, 192, 123)),
];

/// Fallback accents for platforms not listed above, picked by name
const EXTRA_ACCENTS: [Color; 4] = [
    Color::Rgb(224, 108, 117),
    Color::Rgb(209, 154, 102),
    Color::Rgb(171, 178, 191),
    Color::Rgb(130, 170, 255),
];

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub error: Color,
    pub selection_fg: Color,
    /// Accent when no platform is selected
    pub neutral_accent: Color,
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Rgb(220, 223, 228),
            muted: Color::Rgb(92, 99, 112),
            border: Color::Rgb(62, 68, 81),
            error: Color::Rgb(224, 108, 117),
            selection_fg: Color::Rgb(40, 44, 52),
            neutral_accent: Color::Rgb(171, 178, 191),
            border_type: BorderType::Rounded,
        }
    }
}

impl Theme {
    /// Accent colour for a platform key (stable across runs)
    pub fn accent_for(&self, platform: Option<&str>) -> Color {
        let Some(platform) = platform else {
            return self.neutral_accent;
        };

        let key = platform.to_lowercase();
        PLATFORM_ACCENTS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, color)| *color)
            .unwrap_or_else(|| {
                let sum: usize = key.bytes().map(usize::from).sum();
                EXTRA_ACCENTS[sum % EXTRA_ACCENTS.len()]
            })
    }

    pub fn tag_color(&self, tag: Tag) -> Color {
        match tag {
            Tag::Mandatory => Color::Rgb(224, 108, 117),
            Tag::Optional => Color::Rgb(97, 175, 239),
            Tag::Basic => Color::Rgb(152, 195, 121),
            Tag::Advanced => Color::Rgb(198, 120, 221),
        }
    }

    /// Highlight style for the row under the cursor
    pub fn selected(&self, accent: Color) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(accent)
            .add_modifier(Modifier::BOLD)
    }
}
