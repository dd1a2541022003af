use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::errors::SettingsError;

/// PBKDF2-HMAC-SHA256 iteration count used when deriving the key.
pub const KDF_ITERATIONS: u32 = 100_000;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Derive a 256-bit encryption key from a password using PBKDF2-HMAC-SHA256.
///
/// The salt must be random and unique per generated key file; the same
/// password and salt always re-derive the same key.
#[must_use]
pub fn derive_key(password: &str, salt: &[u8; 16]) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, KDF_ITERATIONS, &mut key);
    key
}

/// Encrypt a UTF-8 string into a self-contained base64url token.
///
/// A fresh random nonce is generated per call and prepended to the
/// AES-256-GCM ciphertext (which carries the 16-byte auth tag), so the
/// token authenticates itself and repeated encryption of the same
/// plaintext yields different tokens.
///
/// The empty string maps to an empty token: "no secret" needs no ciphertext.
pub fn encrypt_token(plaintext: &str, key: &[u8; 32]) -> Result<String, SettingsError> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| SettingsError::Encryption(format!("Failed to create cipher: {e}")))?;
    let nonce_bytes = generate_nonce()?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| SettingsError::Encryption(format!("Encryption failed: {e}")))?;

    let mut token = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    token.extend_from_slice(&nonce_bytes);
    token.extend_from_slice(&ciphertext);

    Ok(URL_SAFE.encode(token))
}

/// Decrypt a token produced by [`encrypt_token`].
///
/// Verifies the authentication tag automatically. Returns
/// `SettingsError::Decryption` when the token fails to decode, is
/// truncated, was encrypted under a different key, or has been tampered
/// with. The empty token decrypts to the empty string.
pub fn decrypt_token(token: &str, key: &[u8; 32]) -> Result<String, SettingsError> {
    if token.is_empty() {
        return Ok(String::new());
    }

    let raw = URL_SAFE.decode(token)?;
    if raw.len() <= NONCE_LEN {
        return Err(SettingsError::Decryption);
    }
    let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| SettingsError::Encryption(format!("Failed to create cipher: {e}")))?;
    let nonce = Nonce::from_slice(nonce_bytes);

    let plaintext = cipher.decrypt(nonce, ciphertext)?;

    String::from_utf8(plaintext).map_err(|_| SettingsError::Decryption)
}

/// Generate cryptographically secure random bytes for a salt.
pub fn generate_salt() -> Result<[u8; 16], SettingsError> {
    let mut salt = [0u8; 16];
    getrandom::getrandom(&mut salt)
        .map_err(|e| SettingsError::Encryption(format!("Failed to generate random salt: {e}")))?;
    Ok(salt)
}

/// Generate cryptographically secure random bytes for a nonce.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN], SettingsError> {
    let mut nonce = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut nonce)
        .map_err(|e| SettingsError::Encryption(format!("Failed to generate random nonce: {e}")))?;
    Ok(nonce)
}
