//! App state and main loop: input handling, following engine output, drawing.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fetchtop_engine::{MeterValues, Snapshot};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::watch;
use tokio::time::sleep;

use crate::ui;

pub struct App {
    snapshots: watch::Receiver<Arc<Snapshot>>,
    meters: watch::Receiver<MeterValues>,
    should_quit: bool,
}

impl App {
    pub fn new(
        snapshots: watch::Receiver<Arc<Snapshot>>,
        meters: watch::Receiver<MeterValues>,
    ) -> Self {
        Self {
            snapshots,
            meters,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    if matches!(
                        k.code,
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                    ) {
                        self.should_quit = true;
                    }
                }
            }
            if self.should_quit {
                break;
            }

            // Latest engine output; the receivers never block.
            let snapshot = self.snapshots.borrow_and_update().clone();
            let meters = *self.meters.borrow_and_update();
            terminal.draw(|f| ui::draw(f, &snapshot, meters))?;

            // Tick rate: faster than the meter cadence so easing stays fluid
            sleep(Duration::from_millis(100)).await;
        }

        Ok(())
    }
}
