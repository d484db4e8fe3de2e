//! TUI application main module
//!
//! Owns the terminal and drives the event loop. Idle ticks are used to
//! collect background generation results and animate the progress view.

use crate::config::AppConfig;
use crate::generation::QuizGenerator;
use crate::tui::event::{EventPoll, TuiEvent, disable_bracketed_paste, enable_bracketed_paste};
use crate::tui::state::AppState;
use crate::tui::ui::render;
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// TUI application
#[derive(Debug)]
pub struct TuiApp {
    /// Terminal
    pub terminal: DefaultTerminal,
    /// Event poller
    pub event_poll: EventPoll,
    /// Application state
    pub state: AppState,
}

impl TuiApp {
    /// Create new TUI application
    pub fn new(config: AppConfig, generator: Arc<dyn QuizGenerator>) -> std::io::Result<Self> {
        let terminal = ratatui::init();
        if let Err(e) = enable_bracketed_paste() {
            debug!(error = %e, "Bracketed paste unavailable");
        }

        Ok(Self {
            terminal,
            event_poll: EventPoll::default(),
            state: AppState::new(config, generator),
        })
    }

    /// Set log path
    pub fn set_log_path(&mut self, path: PathBuf) {
        self.state.log_path = Some(path);
    }

    /// Run application until the user confirms exit or presses Ctrl+C
    pub fn run(&mut self) -> std::io::Result<()> {
        let result = self.event_loop();

        let _ = disable_bracketed_paste();
        ratatui::restore();
        info!("Interactive session ended");
        result
    }

    fn event_loop(&mut self) -> std::io::Result<()> {
        render(&mut self.terminal, &mut self.state)?;

        loop {
            match self.event_poll.next() {
                TuiEvent::None => {
                    self.state.tick();
                    render(&mut self.terminal, &mut self.state)?;
                }
                TuiEvent::Resize(_, _) => {
                    render(&mut self.terminal, &mut self.state)?;
                }
                TuiEvent::CtrlC => {
                    debug!("Ctrl+C received");
                    self.state.go_home();
                    break;
                }
                event => {
                    if self.state.handle_event(event) {
                        break;
                    }
                    render(&mut self.terminal, &mut self.state)?;
                }
            }
        }

        Ok(())
    }
}
