mod app;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use domtable_runtime::MonitorEvent;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

pub use app::{Action, App, action_for};

const TICK_RATE: Duration = Duration::from_millis(250);

pub struct TuiRenderer;

impl TuiRenderer {
    /// Drive the screen until the user quits. Monitor events rebuild the view
    /// between key polls; a closed monitor channel just stops live updates.
    pub fn run(mut app: App, monitor_rx: Option<Receiver<MonitorEvent>>) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        ctrlc::set_handler(move || {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            std::process::exit(0);
        })?;

        let mut monitor_rx = monitor_rx;

        while !app.should_quit {
            terminal.draw(|f| ui::draw(f, &app))?;

            if event::poll(TICK_RATE)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                app.handle_key(key);
            }

            let mut disconnected = false;
            if let Some(rx) = &monitor_rx {
                loop {
                    match rx.try_recv() {
                        Ok(monitor_event) => app.on_monitor_event(monitor_event),
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            disconnected = true;
                            break;
                        }
                    }
                }
            }
            if disconnected {
                tracing::warn!("state file monitor stopped");
                app.monitor_warning = Some("Live updates stopped; press r to refresh".to_string());
                monitor_rx = None;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }
}
