use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use tracing::debug;

use crate::{error::ScanError, scanner::scan_directory};

/// Display name of the synthetic parent entry
pub const PARENT_NAME: &str = "..";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Byte length, 0 for directories
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl Entry {
    pub fn parent_of(dir: &Path) -> Self {
        Self {
            name: PARENT_NAME.to_owned(),
            path: dir.join(PARENT_NAME),
            kind: EntryKind::Directory,
            size: 0,
            modified: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_parent(&self) -> bool {
        self.name == PARENT_NAME
    }

    /// Re-stat the entry after an external program may have changed it.
    pub fn refresh_metadata(&mut self) {
        if let Ok(metadata) = fs::metadata(&self.path) {
            if !metadata.is_dir() {
                self.size = metadata.len();
            }
            self.modified = metadata.modified().ok();
        }
    }
}

#[derive(Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum Pane {
    #[default]
    Left,
    Right,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Pane::Left => Pane::Right,
            Pane::Right => Pane::Left,
        }
    }
}

/// Read-only view of a pane handed to the renderer
#[derive(Clone, Copy, Debug)]
pub struct PaneSnapshot<'a> {
    pub path: &'a Path,
    pub entries: &'a [Entry],
    pub selected: usize,
    pub scroll_top: usize,
}

/// One side of the dual view.
///
/// `selected` is always a valid index into `entries` (or 0 when the listing
/// is empty) and `scroll_top` never passes `selected`.
pub struct PaneState {
    pub path: PathBuf,
    entries: Vec<Entry>,
    selected: usize,
    scroll_top: usize,
}

impl PaneState {
    pub fn new(path: PathBuf, show_hidden: bool, max_entries: usize) -> Result<Self, ScanError> {
        let entries = scan_directory(&path, show_hidden, max_entries)?;
        Ok(Self {
            path,
            entries,
            selected: 0,
            scroll_top: 0,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn snapshot(&self) -> PaneSnapshot<'_> {
        PaneSnapshot {
            path: &self.path,
            entries: self.entries(),
            selected: self.selected(),
            scroll_top: self.scroll_top(),
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    pub fn entry_mut(&mut self, path: &Path) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.path == path)
    }

    /// Rescan the current directory. The previous listing survives a failure.
    pub fn reload(&mut self, show_hidden: bool, max_entries: usize, viewport: usize) -> Result<(), ScanError> {
        self.entries = scan_directory(&self.path, show_hidden, max_entries)?;
        self.clamp(viewport);
        Ok(())
    }

    pub fn move_selection(&mut self, delta: isize, viewport: usize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);

        if self.selected < self.scroll_top {
            self.scroll_top = self.selected;
        } else if viewport > 0 && self.selected >= self.scroll_top + viewport {
            self.scroll_top = self.selected + 1 - viewport;
        }
        self.clamp(viewport);
    }

    pub fn page_up(&mut self, viewport: usize) {
        self.move_selection(-(viewport.max(1) as isize), viewport);
    }

    pub fn page_down(&mut self, viewport: usize) {
        self.move_selection(viewport.max(1) as isize, viewport);
    }

    pub fn select_first(&mut self, viewport: usize) {
        self.selected = 0;
        self.clamp(viewport);
    }

    pub fn select_last(&mut self, viewport: usize) {
        self.move_selection(isize::MAX, viewport);
    }

    /// Put the cursor on the entry at `path` if it is listed.
    pub fn select_path(&mut self, path: &Path, viewport: usize) {
        if let Some(idx) = self.entries.iter().position(|e| e.path == path) {
            let delta = idx as isize - self.selected as isize;
            self.move_selection(delta, viewport);
        }
    }

    /// Re-establish the selection and scroll invariants for `viewport` rows.
    pub fn clamp(&mut self, viewport: usize) {
        let len = self.entries.len();
        self.selected = self.selected.min(len.saturating_sub(1));

        if viewport == 0 || len <= viewport {
            self.scroll_top = 0;
            return;
        }
        if self.scroll_top > self.selected {
            self.scroll_top = self.selected;
        }
        if self.selected >= self.scroll_top + viewport {
            self.scroll_top = self.selected + 1 - viewport;
        }
        // Don't leave empty rows below the last entry
        self.scroll_top = self.scroll_top.min(len - viewport);
    }

    /// Change into the directory entry called `name`.
    ///
    /// `name` may be a listed entry or an absolute path. Returns `Ok(false)`
    /// without touching the pane when the target is not a listed directory or
    /// cannot be resolved.
    pub fn enter(&mut self, name: &str, show_hidden: bool, max_entries: usize) -> Result<bool, ScanError> {
        let listed = self
            .entries
            .iter()
            .find(|e| e.name == name && e.is_dir())
            .map(|e| e.path.clone());
        let target = match listed {
            Some(path) => path,
            None if Path::new(name).is_absolute() => PathBuf::from(name),
            None => return Ok(false),
        };
        self.change_dir(&target, show_hidden, max_entries)
    }

    /// Scan `target` and make it the pane's directory. The path is stored
    /// canonicalized so `..` components never pile up.
    pub fn change_dir(&mut self, target: &Path, show_hidden: bool, max_entries: usize) -> Result<bool, ScanError> {
        let Ok(resolved) = target.canonicalize() else {
            debug!(target = %target.display(), "cannot resolve directory");
            return Ok(false);
        };
        if !resolved.is_dir() {
            return Ok(false);
        }

        self.entries = scan_directory(&resolved, show_hidden, max_entries)?;
        self.path = resolved;
        self.selected = 0;
        self.scroll_top = 0;
        Ok(true)
    }

    /// Change into the parent directory and keep the cursor on the directory just left.
    pub fn go_parent(&mut self, show_hidden: bool, max_entries: usize, viewport: usize) -> Result<bool, ScanError> {
        let previous = self.path.clone();
        let Some(parent) = previous.parent() else {
            return Ok(false);
        };
        if !self.change_dir(parent, show_hidden, max_entries)? {
            return Ok(false);
        }
        self.select_path(&previous, viewport);
        Ok(true)
    }

    /// Move out of a directory that no longer exists into its nearest
    /// surviving ancestor. Returns `Ok(false)` when the path is still there.
    pub fn escape_removed(&mut self, show_hidden: bool, max_entries: usize, viewport: usize) -> Result<bool, ScanError> {
        if self.path.is_dir() {
            return Ok(false);
        }
        let gone = self.path.clone();
        let mut target = gone.clone();
        while !target.is_dir() {
            if !target.pop() {
                target = PathBuf::from("/");
                break;
            }
        }
        debug!(from = %gone.display(), to = %target.display(), "directory vanished");
        let moved = self.change_dir(&target, show_hidden, max_entries)?;
        self.clamp(viewport);
        Ok(moved)
    }

    #[cfg(test)]
    pub fn with_entries(path: PathBuf, entries: Vec<Entry>) -> Self {
        Self {
            path,
            entries,
            selected: 0,
            scroll_top: 0,
        }
    }
}
