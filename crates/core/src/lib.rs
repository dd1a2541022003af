pub mod errors;
pub mod models;
pub mod storage;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::{Map, Value};

use errors::SettingsError;
use models::config::{
    default_document, AudioSettings, OutputSettings, TranscriptionSettings, UiSettings,
};
use storage::paths::ConfigPaths;
use storage::{document, encryption, keyfile};

/// Document key under which the encrypted API credential is stored.
const API_KEY_FIELD: &str = "api_key";

/// Main entry point for the Speech2Text settings library.
/// Holds the in-memory settings document and the encryption key, and owns
/// all reads and writes of the per-user configuration directory.
///
/// Construct one instance at process start and hand it to every consumer —
/// nothing in this crate is a global.
#[must_use]
pub struct SettingsStore {
    paths: ConfigPaths,
    document: Map<String, Value>,
    encryption_key: [u8; 32],
    /// Tracks whether any mutation has occurred since the last save.
    dirty: bool,
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("config_file", &self.paths.config_file)
            .field("top_level_keys", &self.document.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl SettingsStore {
    /// Open the store against the platform's per-user config directory.
    pub fn open() -> Result<Self, SettingsError> {
        Self::open_with(ConfigPaths::resolve()?)
    }

    /// Open the store against an explicit directory instead of the
    /// platform default.
    pub fn open_at(config_dir: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        Self::open_with(ConfigPaths::in_dir(config_dir))
    }

    fn open_with(paths: ConfigPaths) -> Result<Self, SettingsError> {
        fs::create_dir_all(&paths.config_dir)?;

        let encryption_key = keyfile::load_or_create(&paths.key_file)?;
        let document = document::load_or_default(&paths.config_file);
        debug!("settings loaded from {}", paths.config_dir.display());

        Ok(Self {
            paths,
            document,
            encryption_key,
            dirty: false,
        })
    }

    // ── Paths ───────────────────────────────────────────────────────

    /// Directory holding `config.json` and the key file.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.paths.config_dir
    }

    /// Full path of the settings document on disk.
    #[must_use]
    pub fn config_file(&self) -> &Path {
        &self.paths.config_file
    }

    // ── Generic access ──────────────────────────────────────────────

    /// Look up a value by dotted path (e.g. `"audio.sample_rate"`).
    /// Returns `None` when any path segment is missing.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        document::get_path(&self.document, path)
    }

    /// Assign a value at a dotted path, creating intermediate sections as
    /// needed. In-memory only; call [`save`](Self::save) to persist.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        document::set_path(&mut self.document, path, value.into());
        self.dirty = true;
    }

    /// Serialize the whole document to `config.json`.
    /// Clears the unsaved-changes flag on success.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        document::write(&self.document, &self.paths.config_file)?;
        self.dirty = false;
        Ok(())
    }

    /// Whether any mutation has occurred since the last successful save.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── API credential ──────────────────────────────────────────────

    /// Decrypt and return the stored API credential.
    ///
    /// `None` covers every "no usable credential" case: never set, stored
    /// empty, or a token that no longer decrypts (rotated key, corrupted
    /// or tampered ciphertext).
    #[must_use]
    pub fn get_api_key(&self) -> Option<String> {
        let token = self
            .get(API_KEY_FIELD)
            .and_then(Value::as_str)
            .unwrap_or("");
        if token.is_empty() {
            return None;
        }
        match encryption::decrypt_token(token, &self.encryption_key) {
            Ok(plaintext) => Some(plaintext),
            Err(_) => {
                warn!("stored API key failed to decrypt, treating as unset");
                None
            }
        }
    }

    /// Encrypt `api_key` and store the resulting token in the document.
    /// An empty string clears the credential. In-memory only.
    pub fn set_api_key(&mut self, api_key: &str) -> Result<(), SettingsError> {
        let token = encryption::encrypt_token(api_key, &self.encryption_key)?;
        self.set(API_KEY_FIELD, token);
        Ok(())
    }

    /// Syntactic sanity check for an OpenAI-style API key.
    /// Not a live credential check.
    #[must_use]
    pub fn validate_api_key(candidate: &str) -> bool {
        candidate.starts_with("sk-") && candidate.len() > 20
    }

    // ── Typed sections ──────────────────────────────────────────────

    /// Microphone capture parameters with defaults applied.
    #[must_use]
    pub fn get_audio_settings(&self) -> AudioSettings {
        self.section("audio")
    }

    /// Transcription request parameters with defaults applied.
    #[must_use]
    pub fn get_transcription_settings(&self) -> TranscriptionSettings {
        self.section("transcription")
    }

    /// Window geometry and theme with defaults applied.
    #[must_use]
    pub fn get_ui_settings(&self) -> UiSettings {
        self.section("ui")
    }

    /// Transcript output options with defaults applied.
    #[must_use]
    pub fn get_output_settings(&self) -> OutputSettings {
        self.section("output")
    }

    /// Deserialize a top-level section into its typed struct.
    /// Missing fields take their documented defaults; a missing or
    /// malformed section falls back to the full default.
    fn section<T>(&self, name: &str) -> T
    where
        T: serde::de::DeserializeOwned + Default,
    {
        self.document
            .get(name)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }

    // ── Reset / Export / Import ─────────────────────────────────────

    /// Replace the whole document with a fresh copy of the default
    /// schema. All customization is lost and the credential reverts to
    /// unset. In-memory only.
    pub fn reset_to_defaults(&mut self) {
        self.document = default_document();
        self.dirty = true;
    }

    /// Write the document to an arbitrary path with the API credential
    /// blanked. The ciphertext never leaves the config directory.
    pub fn export_settings(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let mut exported = self.document.clone();
        exported.insert(API_KEY_FIELD.to_string(), Value::String(String::new()));
        document::write(&exported, path.as_ref())
    }

    /// Deep-merge a settings file into the current document, discarding
    /// any `api_key` it carries. A malformed or unreadable file leaves
    /// the in-memory state untouched.
    pub fn import_settings(&mut self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let text = fs::read_to_string(path.as_ref())?;
        let mut imported = match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => map,
            _ => {
                return Err(SettingsError::InvalidDocument(
                    "document root is not a JSON object".into(),
                ));
            }
        };
        imported.remove(API_KEY_FIELD);

        document::deep_merge(&mut self.document, imported);
        self.dirty = true;
        Ok(())
    }
}
