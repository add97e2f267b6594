pub mod columns;
pub mod list;
pub mod watch;
pub mod watch_console;
pub mod watch_tui;
