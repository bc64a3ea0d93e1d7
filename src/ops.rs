//! File operations on the active pane's selection
//!
//! A successful mutation rescans every pane whose directory contains an
//! affected path, so the other pane stays in sync when it shows the same tree.

use std::{
    ffi::OsStr,
    fs, io,
    path::{Component, Path, PathBuf},
};

use tracing::info;

use crate::{
    delegate::Handoff,
    error::OpError,
    pane::{Entry, EntryKind},
    session::Session,
};

/// A delete the user still has to confirm.
///
/// Only `Session::request_delete` creates one, so `Session::delete` cannot run
/// without passing through the confirmation step.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    path: PathBuf,
    name: String,
    kind: EntryKind,
}

impl PendingDelete {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }
}

/// Accept only a single plain name so the result stays inside the pane's directory.
fn plain_name(name: &str) -> io::Result<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(std::path::is_separator) => Ok(name),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "name must not contain a path separator or be '.' or '..'",
        )),
    }
}

impl Session {
    /// Selected entry, excluding the synthetic `..`
    fn operable_entry(&self) -> Option<&Entry> {
        self.active_pane().selected_entry().filter(|e| !e.is_parent())
    }

    pub fn create_directory(&mut self, name: &str) -> Result<Option<PathBuf>, OpError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let create_failed = |source| OpError::CreateFailed {
            name: name.to_owned(),
            source,
        };
        let path = self.active_pane().path.join(plain_name(name).map_err(create_failed)?);
        fs::create_dir(&path).map_err(create_failed)?;
        info!(path = %path.display(), "created directory");

        self.refresh_affected(&[path.as_path()]);
        let viewport = self.viewport();
        self.active_pane_mut().select_path(&path, viewport);
        Ok(Some(path))
    }

    pub fn rename(&mut self, new_name: &str) -> Result<Option<PathBuf>, OpError> {
        let Some(entry) = self.operable_entry() else {
            return Ok(None);
        };
        let (from, old_name) = (entry.path.clone(), entry.name.clone());
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name == old_name {
            return Ok(None);
        }

        let rename_failed = |source| OpError::RenameFailed {
            from: old_name.clone(),
            to: new_name.to_owned(),
            source,
        };
        let to = self.active_pane().path.join(plain_name(new_name).map_err(rename_failed)?);
        fs::rename(&from, &to).map_err(rename_failed)?;
        info!(from = %from.display(), to = %to.display(), "renamed");

        self.refresh_affected(&[from.as_path(), to.as_path()]);
        let viewport = self.viewport();
        self.active_pane_mut().select_path(&to, viewport);
        Ok(Some(to))
    }

    pub fn request_delete(&self) -> Option<PendingDelete> {
        self.operable_entry().map(|entry| PendingDelete {
            path: entry.path.clone(),
            name: entry.name.clone(),
            kind: entry.kind,
        })
    }

    /// Remove a confirmed entry: `rmdir` for directories, `unlink` otherwise.
    pub fn delete(&mut self, pending: PendingDelete) -> Result<(), OpError> {
        let is_link = fs::symlink_metadata(&pending.path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        let result = match pending.kind {
            EntryKind::Directory if !is_link => fs::remove_dir(&pending.path),
            _ => fs::remove_file(&pending.path),
        };
        result.map_err(|source| OpError::DeleteFailed {
            kind: pending.kind,
            name: pending.name.clone(),
            source,
        })?;
        info!(path = %pending.path.display(), "deleted");

        self.refresh_affected(&[pending.path.as_path()]);
        Ok(())
    }

    pub fn copy_to_clipboard(&mut self) -> Option<PathBuf> {
        let path = self.operable_entry()?.path.clone();
        self.clipboard.copy(path.clone());
        Some(path)
    }

    pub fn cut_to_clipboard(&mut self) -> Option<PathBuf> {
        let path = self.operable_entry()?.path.clone();
        self.clipboard.cut(path.clone());
        Some(path)
    }

    /// Copy (`cp -r`) or move (`mv`) the clipboard source into the active pane.
    ///
    /// Returns `Ok(None)` when the clipboard is empty. The clipboard is
    /// emptied by every attempt, successful or not.
    pub fn paste(&mut self) -> Result<Option<PathBuf>, OpError> {
        let Some(item) = self.clipboard.take() else {
            return Ok(None);
        };
        let source = item.path;
        let Some(base_name) = source.file_name() else {
            return Err(OpError::PasteRefused { path: source.clone() });
        };

        let dest = self.active_pane().path.join(base_name);
        if dest == source {
            return Err(OpError::PasteRefused { path: dest });
        }
        if source.is_dir() && dest.starts_with(&source) {
            return Err(OpError::PasteIntoSelf { path: source });
        }
        // cp/mv would nest the source inside an existing directory
        if dest.is_dir() {
            return Err(OpError::PasteTargetExists { path: dest });
        }

        let result = if item.cut {
            self.launcher.launch(
                "mv",
                &[source.as_os_str(), dest.as_os_str()],
                Handoff::Captured,
            )
        } else {
            self.launcher.launch(
                "cp",
                &[OsStr::new("-r"), source.as_os_str(), dest.as_os_str()],
                Handoff::Captured,
            )
        };

        // The primitive may have done part of its work even when it failed
        let affected: Vec<&Path> = if item.cut {
            vec![dest.as_path(), source.as_path()]
        } else {
            vec![dest.as_path()]
        };
        self.refresh_affected(&affected);

        result?;
        info!(from = %source.display(), to = %dest.display(), cut = item.cut, "pasted");
        Ok(Some(dest))
    }
}
