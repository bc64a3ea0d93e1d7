use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::ScanError,
    pane::{Entry, EntryKind, PARENT_NAME},
};

/// Listing cap used when the config does not set one
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// Read `path` into an ordered listing.
///
/// The synthetic `..` entry comes first (except at the filesystem root),
/// followed by the directory contents in read order. Entries that cannot be
/// stat'ed are skipped, and the listing never grows past `max_entries`.
pub fn scan_directory(
    path: &Path,
    show_hidden: bool,
    max_entries: usize,
) -> Result<Vec<Entry>, ScanError> {
    let unreadable = |source| ScanError::Unreadable {
        path: path.to_path_buf(),
        source,
    };
    let read_dir = fs::read_dir(path).map_err(unreadable)?;

    let mut entries = Vec::new();

    if path != Path::new("/") {
        entries.push(Entry::parent_of(path));
    }

    for dir_entry in read_dir {
        if entries.len() >= max_entries {
            debug!(path = %path.display(), max_entries, "listing truncated");
            break;
        }

        let Ok(dir_entry) = dir_entry else {
            continue;
        };
        let name = dir_entry.file_name().to_string_lossy().into_owned();
        if name == "." || name == PARENT_NAME {
            continue;
        }
        if !show_hidden && name.starts_with('.') {
            continue;
        }

        // The lossy name is for display only, the real path keeps the raw bytes
        let full_path: PathBuf = dir_entry.path();
        // fs::metadata follows symlinks, dangling links drop out here
        let metadata = match fs::metadata(&full_path) {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(path = %full_path.display(), error = %e, "skipping entry");
                continue;
            }
        };

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        entries.push(Entry {
            name,
            path: full_path,
            kind,
            size: if kind == EntryKind::Directory { 0 } else { metadata.len() },
            modified: metadata.modified().ok(),
        });
    }

    debug!(path = %path.display(), count = entries.len(), "scanned directory");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use tempfile::TempDir;

    use super::*;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"hello").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join(".secret")).unwrap();
        dir
    }

    #[test]
    fn parent_entry_comes_first() {
        let dir = fixture();
        let entries = scan_directory(dir.path(), false, DEFAULT_MAX_ENTRIES).unwrap();

        let parent = &entries[0];
        assert_eq!(parent.name, "..");
        assert_eq!(parent.path, dir.path().join(".."));
        assert!(parent.is_dir());
        assert_eq!(parent.size, 0);
        assert_eq!(entries.iter().filter(|e| e.is_parent()).count(), 1);
    }

    #[test]
    fn root_has_no_parent_entry() {
        let entries = scan_directory(Path::new("/"), true, DEFAULT_MAX_ENTRIES).unwrap();
        assert!(entries.iter().all(|e| e.name != ".."));
    }

    #[test]
    fn hidden_entries_follow_the_flag() {
        let dir = fixture();

        let visible = scan_directory(dir.path(), false, DEFAULT_MAX_ENTRIES).unwrap();
        assert!(visible.iter().all(|e| !e.name.starts_with('.') || e.is_parent()));

        let all = scan_directory(dir.path(), true, DEFAULT_MAX_ENTRIES).unwrap();
        assert!(names(&all).contains(&".secret"));
        assert_eq!(all.len(), visible.len() + 1);
        assert!(all.iter().all(|e| e.name != "."));
        assert_eq!(all.iter().filter(|e| e.name == "..").count(), 1);
    }

    #[test]
    fn entries_carry_kind_and_size() {
        let dir = fixture();
        let entries = scan_directory(dir.path(), false, DEFAULT_MAX_ENTRIES).unwrap();

        let file = entries.iter().find(|e| e.name == "a.txt").unwrap();
        assert_eq!(file.kind, EntryKind::File);
        assert_eq!(file.size, 5);
        assert_eq!(file.path, dir.path().join("a.txt"));
        assert!(file.modified.is_some());

        let sub = entries.iter().find(|e| e.name == "sub").unwrap();
        assert_eq!(sub.kind, EntryKind::Directory);
        assert_eq!(sub.size, 0);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("broken")).unwrap();

        let entries = scan_directory(dir.path(), false, DEFAULT_MAX_ENTRIES).unwrap();
        assert!(!names(&entries).contains(&"broken"));
        assert!(names(&entries).contains(&"a.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_is_listed() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let dir = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(dir.path().join(raw), b"bytes").unwrap();

        let entries = scan_directory(dir.path(), false, DEFAULT_MAX_ENTRIES).unwrap();
        assert_eq!(entries.len(), 2);
        let file = &entries[1];
        assert_eq!(file.path, dir.path().join(raw));
        assert_eq!(file.size, 5);
        assert!(file.name.starts_with("caf"));
    }

    #[test]
    fn listing_is_capped() {
        let dir = TempDir::new().unwrap();
        for i in 0..10 {
            File::create(dir.path().join(format!("f{}", i))).unwrap();
        }

        let entries = scan_directory(dir.path(), false, 4).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].name, "..");
    }

    #[test]
    fn missing_directory_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let err = scan_directory(&dir.path().join("nope"), false, DEFAULT_MAX_ENTRIES).unwrap_err();
        assert!(matches!(err, ScanError::Unreadable { .. }));
    }

    #[test]
    fn regular_file_is_unreadable() {
        let dir = fixture();
        let err = scan_directory(&dir.path().join("a.txt"), false, DEFAULT_MAX_ENTRIES).unwrap_err();
        assert!(matches!(err, ScanError::Unreadable { .. }));
    }
}
