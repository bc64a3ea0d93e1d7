use std::{io, path::PathBuf};

use thiserror::Error;

use crate::pane::EntryKind;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Cannot open directory {}: {}", path.display(), describe_io(source))]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum OpError {
    #[error("Could not create directory {name}: {}", describe_io(source))]
    CreateFailed {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Could not rename {from} to {to}: {}", describe_io(source))]
    RenameFailed {
        from: String,
        to: String,
        #[source]
        source: io::Error,
    },

    #[error("Could not delete {} {name}: {}", kind_label(*kind), describe_io(source))]
    DeleteFailed {
        kind: EntryKind,
        name: String,
        #[source]
        source: io::Error,
    },

    /// Source and destination resolve to the same path.
    #[error("Cannot paste {} onto itself", path.display())]
    PasteRefused { path: PathBuf },

    #[error("Cannot paste directory {} into itself", path.display())]
    PasteIntoSelf { path: PathBuf },

    #[error("Cannot paste: directory {} already exists", path.display())]
    PasteTargetExists { path: PathBuf },

    #[error("Paste failed: {0}")]
    PasteFailed(#[from] DelegateError),
}

#[derive(Debug, Error)]
pub enum DelegateError {
    #[error("Failed to run '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {}{}", describe_code(*code), describe_stderr(stderr))]
    Exited {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn describe_io(e: &io::Error) -> String {
    if e.kind() == io::ErrorKind::PermissionDenied {
        "Permission denied".to_owned()
    } else {
        e.to_string()
    }
}

fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Directory => "directory",
        EntryKind::File => "file",
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_owned(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    match stderr.lines().next().map(str::trim) {
        Some(line) if !line.is_empty() => format!(": {}", line),
        _ => String::new(),
    }
}
