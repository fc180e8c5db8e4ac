pub mod panel;
pub mod search;
pub mod shortcuts;
pub mod tooltips;

pub use panel::ui_panel;
pub use search::search_overlay;
pub use shortcuts::handle_shortcuts;
