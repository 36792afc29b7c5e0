use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use predictor::Artifacts;
use ratatui::{backend::CrosstermBackend, Terminal};

use super::{Action, App};
use crate::ui::draw;

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the form until the operator quits.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn run(artifacts: Arc<Artifacts>) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(artifacts);

    loop {
        terminal.draw(|f| draw::draw(f, &app))?;

        if event::poll(Duration::from_millis(120))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
                    break;
                }
                match app.handle_key(k.code) {
                    Action::Quit => break,
                    Action::None => {}
                }
            }
        }
    }

    log::info!("operator quit");
    terminal.show_cursor()?;
    Ok(())
}
