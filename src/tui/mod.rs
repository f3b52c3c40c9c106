//! Terminal User Interface for branchline

pub mod render;

use anyhow::Result;
use ratatui::crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use tracing::info;

use crate::app::{App, Event, Handler};
use crate::git::GitBackend;

/// Run the TUI application until the user quits
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to
pub fn run<G: GitBackend>(mut app: App<G>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = Handler::new(app.config.poll_interval_ms);
    let result = run_loop(&mut terminal, &mut app, &event_handler);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Exiting");
    result
}

fn run_loop<B: Backend, G: GitBackend>(
    terminal: &mut Terminal<B>,
    app: &mut App<G>,
    event_handler: &Handler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick => app.tick(),
            Event::Key(key) => {
                app.handle_key(key.code, key.modifiers);
                app.tick();
            }
            Event::Resize(_, _) => {}
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
