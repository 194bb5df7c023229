/// Responsive breakpoints for TUI layout decisions.
///
/// Width and height thresholds live here so render code has no magic numbers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: split pane; tag badges and counts collapse
    Compact,
    /// 60-109 cols
    Normal,
    /// 110+ cols: full key hints in the status bar
    Wide,
}

/// Terminals shorter than this hide the log panel
const MIN_HEIGHT_FOR_LOGS: u16 = 24;

/// Height of the log panel including borders
pub const LOG_PANEL_HEIGHT: u16 = 7;

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=109 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }
}

pub fn logs_visible(height: u16) -> bool {
    height >= MIN_HEIGHT_FOR_LOGS
}
