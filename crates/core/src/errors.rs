use thiserror::Error;

/// Unified error type for the entire speech2text-core library.
/// Every fallible public function returns `Result<T, SettingsError>`.
#[derive(Debug, Error)]
pub enum SettingsError {
    // ── Configuration directory ─────────────────────────────────────
    #[error("Could not determine a configuration directory for this platform")]
    NoConfigDir,

    // ── Persisted state ─────────────────────────────────────────────
    #[error("Invalid settings document: {0}")]
    InvalidDocument(String),

    #[error("Invalid key file: {0}")]
    InvalidKeyFile(String),

    // ── Encryption ──────────────────────────────────────────────────
    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — rotated key or corrupted token")]
    Decryption,

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O ────────────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Deserialization(e.to_string())
    }
}

impl From<aes_gcm::Error> for SettingsError {
    fn from(_: aes_gcm::Error) -> Self {
        SettingsError::Decryption
    }
}

impl From<base64::DecodeError> for SettingsError {
    fn from(_: base64::DecodeError) -> Self {
        SettingsError::Decryption
    }
}
