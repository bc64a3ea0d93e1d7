//! External programs: pager, editor, openers and the copy/move primitives
//!
//! Every child runs to completion before control returns. Interactive
//! programs get the terminal for the duration of the call.

use std::{
    ffi::OsStr,
    io,
    path::Path,
    process::{Command, ExitStatus, Stdio},
};

use crossterm::{
    ExecutableCommand,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, warn};

use crate::{error::DelegateError, session::Session};

/// Who owns the terminal while the child runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handoff {
    /// The child gets the terminal (pager, editor, opener)
    Terminal,
    /// The child runs in the background with captured output (cp, mv)
    Captured,
}

/// Runs an external program to completion.
///
/// `program` is resolved through `PATH` and every argument is passed as its
/// own token, never through a shell.
pub trait Launcher {
    fn launch(&mut self, program: &str, args: &[&OsStr], handoff: Handoff) -> Result<(), DelegateError>;
}

pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, program: &str, args: &[&OsStr], handoff: Handoff) -> Result<(), DelegateError> {
        debug!(program, ?args, ?handoff, "launching");
        let spawn_failed = |source| DelegateError::SpawnFailed {
            program: program.to_owned(),
            source,
        };

        match handoff {
            Handoff::Terminal => {
                let _suspend = TerminalSuspend::begin();
                let status = Command::new(program).args(args).status().map_err(spawn_failed)?;
                check_status(program, status, String::new())
            }
            Handoff::Captured => {
                let output = Command::new(program)
                    .args(args)
                    .stdin(Stdio::null())
                    .output()
                    .map_err(spawn_failed)?;
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                check_status(program, output.status, stderr)
            }
        }
    }
}

fn check_status(program: &str, status: ExitStatus, stderr: String) -> Result<(), DelegateError> {
    if status.success() {
        Ok(())
    } else {
        Err(DelegateError::Exited {
            program: program.to_owned(),
            code: status.code(),
            stderr,
        })
    }
}

/// Hands the terminal to a child process.
///
/// Leaves raw mode and the alternate screen on creation and restores both
/// when dropped, whatever happened to the child.
pub struct TerminalSuspend;

impl TerminalSuspend {
    pub fn begin() -> Self {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = io::stdout().execute(LeaveAlternateScreen) {
            warn!(error = %e, "failed to leave alternate screen");
        }
        Self
    }
}

impl Drop for TerminalSuspend {
    fn drop(&mut self) {
        if let Err(e) = io::stdout().execute(EnterAlternateScreen) {
            warn!(error = %e, "failed to re-enter alternate screen");
        }
        if let Err(e) = terminal::enable_raw_mode() {
            warn!(error = %e, "failed to restore raw mode");
        }
    }
}

impl Session {
    fn launch_interactive(&mut self, program: &str, path: &Path) -> Result<(), DelegateError> {
        self.request_repaint();
        self.launcher.launch(program, &[path.as_os_str()], Handoff::Terminal)
    }

    /// Show the selected file in the pager. Directories are ignored.
    pub fn view_selected(&mut self) -> Result<(), DelegateError> {
        let Some(entry) = self.active_pane().selected_entry().filter(|e| !e.is_dir()) else {
            return Ok(());
        };
        let path = entry.path.clone();
        let pager = self.config.pager();
        self.launch_interactive(&pager, &path)
    }

    /// Edit the selected file, then refresh its size and mtime in place.
    pub fn edit_selected(&mut self) -> Result<(), DelegateError> {
        let Some(entry) = self.active_pane().selected_entry().filter(|e| !e.is_dir()) else {
            return Ok(());
        };
        let path = entry.path.clone();
        let editor = self.config.editor();
        let result = self.launch_interactive(&editor, &path);

        if let Some(entry) = self.active_pane_mut().entry_mut(&path) {
            entry.refresh_metadata();
        }
        result
    }

    /// Open a file with the program registered for its extension.
    ///
    /// The fallback opener only runs when no rule matches. A matched program
    /// that is missing or fails is reported as is.
    pub fn open_file(&mut self, path: &Path, name: &str) -> Result<(), DelegateError> {
        let program = match self.config.opener_for(name) {
            Some(program) => program.to_owned(),
            None => {
                debug!(name, "no opener rule, using fallback");
                self.config.fallback_opener.clone()
            }
        };
        self.launch_interactive(&program, path)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{cell::RefCell, ffi::OsString, io, rc::Rc};

    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Call {
        pub program: String,
        pub args: Vec<OsString>,
        pub handoff: Handoff,
    }

    /// Launcher double that records calls instead of spawning anything
    #[derive(Clone, Default)]
    pub struct RecordingLauncher {
        pub calls: Rc<RefCell<Vec<Call>>>,
        missing: Vec<String>,
        failing: Vec<String>,
        effect: Option<Rc<dyn Fn(&Call)>>,
    }

    impl RecordingLauncher {
        /// Pretend `program` is not on `PATH`.
        pub fn missing(mut self, program: &str) -> Self {
            self.missing.push(program.to_owned());
            self
        }

        /// Pretend `program` exits with status 1.
        pub fn failing(mut self, program: &str) -> Self {
            self.failing.push(program.to_owned());
            self
        }

        /// Run `effect` for every successful launch, standing in for the child.
        pub fn with_effect(mut self, effect: impl Fn(&Call) + 'static) -> Self {
            self.effect = Some(Rc::new(effect));
            self
        }

        pub fn programs(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|c| c.program.clone()).collect()
        }
    }

    impl Launcher for RecordingLauncher {
        fn launch(&mut self, program: &str, args: &[&OsStr], handoff: Handoff) -> Result<(), DelegateError> {
            let call = Call {
                program: program.to_owned(),
                args: args.iter().map(|a| a.to_os_string()).collect(),
                handoff,
            };
            self.calls.borrow_mut().push(call.clone());

            if self.missing.iter().any(|p| p == program) {
                return Err(DelegateError::SpawnFailed {
                    program: program.to_owned(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                });
            }
            if self.failing.iter().any(|p| p == program) {
                return Err(DelegateError::Exited {
                    program: program.to_owned(),
                    code: Some(1),
                    stderr: String::new(),
                });
            }
            if let Some(effect) = &self.effect {
                effect(&call);
            }
            Ok(())
        }
    }
}
