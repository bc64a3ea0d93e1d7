use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::warn;

use crate::{error::ConfigError, scanner::DEFAULT_MAX_ENTRIES};

pub const APP_NAME: &str = "twincmd";

/// Get the config file path following XDG Base Directory specification
pub fn config_file_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config").join("config.json")
}

/// Directory for log files (XDG state home)
pub fn state_dir() -> PathBuf {
    xdg_dir("XDG_STATE_HOME", ".local/state")
}

fn xdg_dir(var: &str, home_fallback: &str) -> PathBuf {
    let base = env::var(var).map(PathBuf::from).unwrap_or_else(|_| {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_owned());
        PathBuf::from(home).join(home_fallback)
    });
    base.join(APP_NAME)
}

/// Programs tried for files whose extension matches one of `extensions`
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct OpenerRule {
    pub extensions: Vec<String>,
    pub program: String,
}

impl OpenerRule {
    fn new(extensions: &[&str], program: &str) -> Self {
        Self {
            extensions: extensions.iter().map(|e| (*e).to_owned()).collect(),
            program: program.to_owned(),
        }
    }

    fn matches(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub left_dir: Option<PathBuf>,
    pub right_dir: Option<PathBuf>,
    pub pager: Option<String>,
    pub editor: Option<String>,
    pub fallback_opener: String,
    pub openers: Vec<OpenerRule>,
    /// Upper bound on entries per listing, `..` included
    pub max_entries: usize,
    pub show_hidden: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            left_dir: None,
            right_dir: None,
            pager: None,
            editor: None,
            fallback_opener: "xdg-open".to_owned(),
            openers: vec![
                OpenerRule::new(&["pdf"], "xdg-open"),
                OpenerRule::new(&["txt", "log"], "less"),
                OpenerRule::new(&["jpg", "jpeg", "png", "gif"], "xdg-open"),
            ],
            max_entries: DEFAULT_MAX_ENTRIES,
            show_hidden: false,
        }
    }
}

impl Config {
    /// Load the user config, falling back to defaults when it is missing or broken.
    pub fn load() -> Self {
        let path = config_file_path();
        match Self::from_file(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// `Ok(None)` when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let mut config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.max_entries == 0 {
            config.max_entries = DEFAULT_MAX_ENTRIES;
        }
        Ok(Some(config))
    }

    pub fn pager(&self) -> String {
        self.pager
            .clone()
            .or_else(|| non_empty_var("PAGER"))
            .unwrap_or_else(|| "less".to_owned())
    }

    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| non_empty_var("VISUAL"))
            .or_else(|| non_empty_var("EDITOR"))
            .unwrap_or_else(|| "vi".to_owned())
    }

    /// Opener registered for the extension of `name`, if any.
    pub fn opener_for(&self, name: &str) -> Option<&str> {
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        self.openers
            .iter()
            .find(|rule| rule.matches(ext))
            .map(|rule| rule.program.as_str())
    }

    pub fn left_start(&self) -> PathBuf {
        self.left_dir.clone().unwrap_or_else(|| {
            env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/"))
        })
    }

    pub fn right_start(&self) -> PathBuf {
        self.right_dir.clone().unwrap_or_else(|| PathBuf::from("/"))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
