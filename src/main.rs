mod clipboard;
mod config;
mod delegate;
mod dialog;
mod error;
mod input;
mod logging;
mod ops;
mod pane;
mod render;
mod scanner;
mod session;
mod theme;
mod util;

use std::{
    env,
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::event;
use ratatui::DefaultTerminal;
use tracing::info;

use config::Config;
use delegate::SystemLauncher;
use ops::PendingDelete;
use session::{Outcome, Session};
use util::{EVENT_POLL_MS, STATUS_DISPLAY_SECS};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _log_guard = logging::init_logging(&config::state_dir())?;

    let config = Config::load();
    // twincmd [LEFT] [RIGHT]
    let mut args = env::args_os().skip(1).map(PathBuf::from);
    let left = args.next().unwrap_or_else(|| config.left_start());
    let right = args.next().unwrap_or_else(|| config.right_start());

    let session = Session::new(config, Box::new(SystemLauncher), left, right)?;
    let mut app = App::new(session);
    ratatui::run(|terminal| app.run(terminal))?;

    info!("exiting");
    Ok(())
}

// ============================================================================
// UI Mode
// ============================================================================

#[derive(Default)]
enum UIMode {
    #[default]
    Normal,
    Help,
    MkdirInput { input: String },
    RenameInput { original: String, input: String },
    ConfirmDelete { pending: PendingDelete },
}

/// One line in the status bar
struct StatusMessage {
    text: String,
    is_error: bool,
}

// ============================================================================
// App
// ============================================================================

struct App {
    session: Session,
    ui_mode: UIMode,
    status: Option<(StatusMessage, Instant)>,
    should_quit: bool,
}

impl App {
    fn new(session: Session) -> Self {
        Self {
            session,
            ui_mode: UIMode::Normal,
            status: None,
            should_quit: false,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> std::io::Result<()> {
        info!(
            left = %self.session.left.path.display(),
            right = %self.session.right.path.display(),
            "session started"
        );

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            // Clear old status messages
            if let Some((_, timestamp)) = &self.status {
                if timestamp.elapsed() > Duration::from_secs(STATUS_DISPLAY_SECS) {
                    self.status = None;
                }
            }

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                if let Some(key) = input::key_press(event::read()?) {
                    self.handle_key_event(key);
                }
            }

            // A child process had the terminal, force ratatui to do a full redraw
            if self.session.take_repaint() {
                terminal.clear()?;
            }
        }

        Ok(())
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some((StatusMessage { text, is_error }, Instant::now()));
    }

    /// Apply what the session asked the UI to do
    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Continue => {}
            Outcome::Help => self.ui_mode = UIMode::Help,
            Outcome::PromptMkdir => {
                self.ui_mode = UIMode::MkdirInput {
                    input: String::new(),
                }
            }
            Outcome::PromptRename { current } => {
                self.ui_mode = UIMode::RenameInput {
                    input: current.clone(),
                    original: current,
                }
            }
            Outcome::ConfirmDelete(pending) => self.ui_mode = UIMode::ConfirmDelete { pending },
            Outcome::Info(text) => self.set_status(text, false),
            Outcome::Error(text) => self.set_status(text, true),
            Outcome::Quit => self.should_quit = true,
        }
    }
}
