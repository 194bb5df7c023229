// Reusable TUI components
//
// Each bar or panel renders from App state into the area it is given.

mod logs_panel;
mod status_bar;
mod title_bar;
mod toast;

pub use logs_panel::render as render_logs_panel;
pub use status_bar::render as render_status;
pub use title_bar::render as render_title;
pub use toast::Toast;
