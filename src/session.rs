use std::{fmt::Display, path::{Path, PathBuf}};

use tracing::{info, warn};

use crate::{
    clipboard::Clipboard,
    config::Config,
    delegate::Launcher,
    error::ScanError,
    ops::PendingDelete,
    pane::{Pane, PaneState},
};

/// Logical input events; key bindings live in the UI layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Home,
    End,
    SwitchPane,
    /// Enter a directory or open a file
    Activate,
    GoParent,
    ShowHelp,
    View,
    Edit,
    MarkCopy,
    MarkCut,
    Rename,
    MakeDirectory,
    Delete,
    ToggleHidden,
    Quit,
    Paste,
}

/// What the UI has to do after an action was handled
#[derive(Debug)]
pub enum Outcome {
    Continue,
    Help,
    PromptMkdir,
    PromptRename { current: String },
    ConfirmDelete(PendingDelete),
    Info(String),
    Error(String),
    Quit,
}

/// Everything the browser knows: both panes, which one is active, the
/// clipboard and the hidden-file filter.
pub struct Session {
    pub left: PaneState,
    pub right: PaneState,
    pub active: Pane,
    pub clipboard: Clipboard,
    pub show_hidden: bool,
    pub config: Config,
    pub(crate) launcher: Box<dyn Launcher>,
    viewport: usize,
    needs_repaint: bool,
}

impl Session {
    /// Open both panes. A pane whose start directory cannot be read falls back to `/`.
    pub fn new(
        config: Config,
        launcher: Box<dyn Launcher>,
        left_dir: PathBuf,
        right_dir: PathBuf,
    ) -> Result<Self, ScanError> {
        let show_hidden = config.show_hidden;
        let left = open_pane(left_dir, show_hidden, config.max_entries)?;
        let right = open_pane(right_dir, show_hidden, config.max_entries)?;

        Ok(Self {
            left,
            right,
            active: Pane::Left,
            clipboard: Clipboard::default(),
            show_hidden,
            config,
            launcher,
            viewport: 0,
            needs_repaint: false,
        })
    }

    pub fn pane(&self, side: Pane) -> &PaneState {
        match side {
            Pane::Left => &self.left,
            Pane::Right => &self.right,
        }
    }

    pub fn pane_mut(&mut self, side: Pane) -> &mut PaneState {
        match side {
            Pane::Left => &mut self.left,
            Pane::Right => &mut self.right,
        }
    }

    pub fn active_pane(&self) -> &PaneState {
        self.pane(self.active)
    }

    pub fn active_pane_mut(&mut self) -> &mut PaneState {
        self.pane_mut(self.active)
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    /// Record how many rows a pane can show and re-clamp both panes.
    pub fn set_viewport(&mut self, rows: usize) {
        if rows != self.viewport {
            self.viewport = rows;
            self.left.clamp(rows);
            self.right.clamp(rows);
        }
    }

    pub fn request_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// True once after a child process had the terminal.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }

    pub fn switch_pane(&mut self) {
        self.active = self.active.other();
    }

    /// Rescan `side`, keeping its old listing if the directory became unreadable.
    pub fn reload(&mut self, side: Pane) -> Result<(), ScanError> {
        let (show_hidden, max_entries, viewport) = (self.show_hidden, self.config.max_entries, self.viewport);
        self.pane_mut(side).reload(show_hidden, max_entries, viewport)
    }

    /// Rescan every pane showing an ancestor (or the parent itself) of one of
    /// `paths`, or sitting inside one of them.
    ///
    /// Runs after a mutation already happened, so rescan trouble is logged
    /// rather than reported. A pane whose directory is gone moves up to the
    /// nearest ancestor that still exists.
    pub fn refresh_affected(&mut self, paths: &[&Path]) {
        let (show_hidden, max_entries, viewport) = (self.show_hidden, self.config.max_entries, self.viewport);
        for side in [Pane::Left, Pane::Right] {
            let pane_path = &self.pane(side).path;
            if !paths
                .iter()
                .any(|p| p.starts_with(pane_path) || pane_path.starts_with(p))
            {
                continue;
            }
            let pane = self.pane_mut(side);
            let result = match pane.escape_removed(show_hidden, max_entries, viewport) {
                Ok(true) => Ok(()),
                Ok(false) => pane.reload(show_hidden, max_entries, viewport),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                warn!(pane = ?side, error = %e, "rescan after operation failed");
            }
        }
    }

    /// Flip the hidden-file filter and rescan both panes.
    pub fn toggle_hidden(&mut self) -> Result<(), ScanError> {
        self.show_hidden = !self.show_hidden;
        info!(show_hidden = self.show_hidden, "toggled hidden files");
        let left = self.reload(Pane::Left);
        let right = self.reload(Pane::Right);
        left.and(right)
    }

    pub fn enter_selected(&mut self) -> Result<(), ScanError> {
        let Some(name) = self
            .active_pane()
            .selected_entry()
            .filter(|e| e.is_dir())
            .map(|e| e.name.clone())
        else {
            return Ok(());
        };
        let (show_hidden, max_entries, viewport) = (self.show_hidden, self.config.max_entries, self.viewport);
        let pane = self.active_pane_mut();
        pane.enter(&name, show_hidden, max_entries)?;
        pane.clamp(viewport);
        Ok(())
    }

    pub fn go_parent(&mut self) -> Result<(), ScanError> {
        let (show_hidden, max_entries, viewport) = (self.show_hidden, self.config.max_entries, self.viewport);
        self.active_pane_mut().go_parent(show_hidden, max_entries, viewport)?;
        Ok(())
    }

    /// Directory entries are entered, files go to their opener.
    fn activate(&mut self) -> Outcome {
        let Some(entry) = self.active_pane().selected_entry() else {
            return Outcome::Continue;
        };
        if entry.is_dir() {
            return report(self.enter_selected());
        }
        let (path, name) = (entry.path.clone(), entry.name.clone());
        report(self.open_file(&path, &name))
    }

    /// Run `action` against the active pane.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let viewport = self.viewport;
        match action {
            Action::MoveUp => self.active_pane_mut().move_selection(-1, viewport),
            Action::MoveDown => self.active_pane_mut().move_selection(1, viewport),
            Action::PageUp => self.active_pane_mut().page_up(viewport),
            Action::PageDown => self.active_pane_mut().page_down(viewport),
            Action::Home => self.active_pane_mut().select_first(viewport),
            Action::End => self.active_pane_mut().select_last(viewport),
            Action::SwitchPane => self.switch_pane(),
            Action::Activate => return self.activate(),
            Action::GoParent => return report(self.go_parent()),
            Action::ShowHelp => return Outcome::Help,
            Action::View => return report(self.view_selected()),
            Action::Edit => return report(self.edit_selected()),
            Action::MarkCopy => {
                if let Some(path) = self.copy_to_clipboard() {
                    return Outcome::Info(format!("Marked for copy: {}", path.display()));
                }
            }
            Action::MarkCut => {
                if let Some(path) = self.cut_to_clipboard() {
                    return Outcome::Info(format!("Marked for move: {}", path.display()));
                }
            }
            Action::Rename => {
                if let Some(entry) = self.active_pane().selected_entry().filter(|e| !e.is_parent()) {
                    return Outcome::PromptRename {
                        current: entry.name.clone(),
                    };
                }
            }
            Action::MakeDirectory => return Outcome::PromptMkdir,
            Action::Delete => {
                if let Some(pending) = self.request_delete() {
                    return Outcome::ConfirmDelete(pending);
                }
            }
            Action::ToggleHidden => return report(self.toggle_hidden()),
            Action::Quit => return Outcome::Quit,
            Action::Paste => {
                return match self.paste() {
                    Ok(Some(dest)) => Outcome::Info(format!("Pasted {}", dest.display())),
                    Ok(None) => Outcome::Continue,
                    Err(e) => failure(e),
                };
            }
        }
        Outcome::Continue
    }
}

fn open_pane(dir: PathBuf, show_hidden: bool, max_entries: usize) -> Result<PaneState, ScanError> {
    let dir = dir.canonicalize().unwrap_or(dir);
    PaneState::new(dir.clone(), show_hidden, max_entries).or_else(|e| {
        warn!(error = %e, "falling back to /");
        PaneState::new(PathBuf::from("/"), show_hidden, max_entries)
    })
}

/// Turn an operation result into something the UI can show.
pub fn report<E: Display>(result: Result<(), E>) -> Outcome {
    match result {
        Ok(()) => Outcome::Continue,
        Err(e) => failure(e),
    }
}

pub fn failure<E: Display>(error: E) -> Outcome {
    warn!(error = %error, "operation failed");
    Outcome::Error(error.to_string())
}
