//! Where save files live.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding the save directory.
pub const SAVE_DIR_ENV: &str = "ADVENTURE_SAVE_DIR";

/// Directory name used under the home directory.
pub const SAVE_DIR_NAME: &str = ".adventure-saves";

/// Configuration for save slot storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveConfig {
    /// Directory holding `<slot>.sav` files.
    pub dir: PathBuf,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl SaveConfig {
    /// Resolve the directory from `ADVENTURE_SAVE_DIR`, then `$HOME`.
    pub fn from_env() -> Self {
        Self::resolve(
            None,
            std::env::var_os(SAVE_DIR_ENV),
            std::env::var_os("HOME"),
        )
    }

    /// Resolve the directory: an explicit path wins, then the environment
    /// override, then `<home>/.adventure-saves`, then `./.adventure-saves`.
    /// Empty values count as unset.
    pub fn resolve(
        explicit: Option<PathBuf>,
        env_dir: Option<OsString>,
        home: Option<OsString>,
    ) -> Self {
        let non_empty = |value: Option<OsString>| value.filter(|v| !v.is_empty());

        let dir = explicit
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| non_empty(env_dir).map(PathBuf::from))
            .or_else(|| non_empty(home).map(|h| PathBuf::from(h).join(SAVE_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(SAVE_DIR_NAME));
        Self { dir }
    }

    /// Set the save directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }
}
