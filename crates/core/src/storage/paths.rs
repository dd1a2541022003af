//! Per-user configuration paths resolved via the `dirs` crate.
//!
//! Layout:
//!   Windows: %APPDATA%\Speech2Text\
//!   macOS:   ~/Library/Application Support/speech2text/
//!   Linux:   ~/.config/speech2text/
//!
//! The directory holds `config.json` (the settings document) and `.key`
//! (the derived encryption key with its salt).

use std::path::PathBuf;

use crate::errors::SettingsError;

/// Resolved locations of the store's on-disk files.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Per-user configuration directory.
    pub config_dir: PathBuf,
    /// Full path to `config.json`.
    pub config_file: PathBuf,
    /// Full path to the `.key` file.
    pub key_file: PathBuf,
}

impl ConfigPaths {
    #[cfg(windows)]
    const APP_DIR: &'static str = "Speech2Text";
    #[cfg(not(windows))]
    const APP_DIR: &'static str = "speech2text";

    /// File name of the settings document.
    pub const CONFIG_FILE: &'static str = "config.json";
    /// File name of the encryption key file.
    pub const KEY_FILE: &'static str = ".key";

    /// Resolve the platform's per-user configuration directory.
    ///
    /// Returns `SettingsError::NoConfigDir` when the platform cannot
    /// provide a config root (effectively never on desktop targets).
    pub fn resolve() -> Result<Self, SettingsError> {
        let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::in_dir(base.join(Self::APP_DIR)))
    }

    /// Place all files under an explicit directory instead of the platform
    /// default.
    pub fn in_dir(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let config_file = config_dir.join(Self::CONFIG_FILE);
        let key_file = config_dir.join(Self::KEY_FILE);
        Self {
            config_dir,
            config_file,
            key_file,
        }
    }
}
