use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipboardMode {
    Empty,
    Copy,
    Cut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardItem {
    pub path: PathBuf,
    /// `true` when the source should be moved rather than copied
    pub cut: bool,
}

/// Single-slot holder of a pending copy or move source.
#[derive(Default, Debug)]
pub struct Clipboard {
    item: Option<ClipboardItem>,
}

impl Clipboard {
    pub fn copy(&mut self, path: PathBuf) {
        self.item = Some(ClipboardItem { path, cut: false });
    }

    pub fn cut(&mut self, path: PathBuf) {
        self.item = Some(ClipboardItem { path, cut: true });
    }

    pub fn mode(&self) -> ClipboardMode {
        match &self.item {
            None => ClipboardMode::Empty,
            Some(item) if item.cut => ClipboardMode::Cut,
            Some(_) => ClipboardMode::Copy,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.item.as_ref().map(|item| item.path.as_path())
    }

    /// Empty the slot and hand back what it held.
    pub fn take(&mut self) -> Option<ClipboardItem> {
        self.item.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let clipboard = Clipboard::default();
        assert_eq!(clipboard.mode(), ClipboardMode::Empty);
        assert!(clipboard.source().is_none());
    }

    #[test]
    fn latest_request_wins() {
        let mut clipboard = Clipboard::default();
        clipboard.copy(PathBuf::from("/tmp/a"));
        assert_eq!(clipboard.mode(), ClipboardMode::Copy);

        clipboard.cut(PathBuf::from("/tmp/b"));
        assert_eq!(clipboard.mode(), ClipboardMode::Cut);
        assert_eq!(clipboard.source(), Some(Path::new("/tmp/b")));
    }

    #[test]
    fn take_consumes_once() {
        let mut clipboard = Clipboard::default();
        clipboard.cut(PathBuf::from("/tmp/a"));

        let item = clipboard.take().unwrap();
        assert!(item.cut);
        assert_eq!(clipboard.mode(), ClipboardMode::Empty);
        assert!(clipboard.take().is_none());
    }
}
