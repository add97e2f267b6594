pub mod console;
pub mod tui;

pub use console::TableView;
pub use tui::TuiRenderer;
