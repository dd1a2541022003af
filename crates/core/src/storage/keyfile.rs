//! Lazy creation and loading of the encryption key file.
//!
//! `.key` is a small JSON document sitting next to `config.json`:
//! `{"key": "<base64url 32-byte key>", "salt": "<base64url 16-byte salt>"}`.
//! The key is derived once from a fixed application password and a random
//! salt, then reused verbatim on every subsequent start. A missing or
//! corrupt key file is replaced with a freshly derived key; any credential
//! token encrypted under the old key then fails to decrypt and the store
//! reports the credential as unset.

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use log::warn;
use serde::{Deserialize, Serialize};

use super::encryption;
use crate::errors::SettingsError;

/// Application-level password the key is derived from.
const KEY_PASSWORD: &str = "speech2text_default_key";

/// On-disk layout of the `.key` file.
#[derive(Debug, Serialize, Deserialize)]
struct KeyFile {
    key: String,
    salt: String,
}

/// Load the encryption key, deriving and persisting a fresh one when the
/// file is absent or unusable.
pub fn load_or_create(path: &Path) -> Result<[u8; 32], SettingsError> {
    if path.exists() {
        match read_key(path) {
            Ok(key) => return Ok(key),
            Err(e) => {
                warn!(
                    "key file {} is unusable ({e}), generating a new key",
                    path.display()
                );
            }
        }
    }
    create(path)
}

fn read_key(path: &Path) -> Result<[u8; 32], SettingsError> {
    let text = fs::read_to_string(path)?;
    let key_file: KeyFile = serde_json::from_str(&text)?;
    let raw = URL_SAFE
        .decode(key_file.key.as_bytes())
        .map_err(|e| SettingsError::InvalidKeyFile(format!("key is not valid base64url: {e}")))?;
    raw.try_into()
        .map_err(|_| SettingsError::InvalidKeyFile("key is not 32 bytes".into()))
}

/// Derive a new key from the application password and a random salt, then
/// persist both.
fn create(path: &Path) -> Result<[u8; 32], SettingsError> {
    let salt = encryption::generate_salt()?;
    let key = encryption::derive_key(KEY_PASSWORD, &salt);

    let key_file = KeyFile {
        key: URL_SAFE.encode(key),
        salt: URL_SAFE.encode(salt),
    };
    let text = serde_json::to_string(&key_file)
        .map_err(|e| SettingsError::Serialization(e.to_string()))?;
    fs::write(path, text)?;

    Ok(key)
}
