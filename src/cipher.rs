//! Authenticated encryption of individual PII fragments.
//!
//! Each fragment is sealed independently with AES-256-GCM under a
//! per-document key. The envelope layout is `nonce (12 bytes) || ciphertext
//! || tag`, encoded with the URL-safe padded base64 alphabet so it can ride
//! inside JSON. A fresh nonce comes from the OS entropy source on every
//! call; encryption and decryption are stateless and safe to run
//! concurrently on independent fragments.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use std::fmt;

use crate::error::{ShroudError, ShroudResult};

/// Key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Nonce length in bytes (96 bits, the AES-GCM standard size).
pub const NONCE_LEN: usize = 12;

/// One-time 256-bit redaction key.
///
/// Generated once per document redaction and owned by the caller from then
/// on; the engine never persists it and never writes it into the ledger.
/// The `Debug` impl is intentionally opaque so the key cannot leak through
/// logging or error formatting.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactionKey([u8; KEY_LEN]);

impl RedactionKey {
    /// Generates a fresh key from the OS entropy source.
    pub fn generate() -> Self {
        let key = Aes256Gcm::generate_key(OsRng);
        Self(key.into())
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Decodes a key from its base64url text form.
    pub fn from_base64(encoded: &str) -> ShroudResult<Self> {
        let bytes = URL_SAFE
            .decode(encoded.trim())
            .map_err(|e| ShroudError::InvalidInput {
                parameter: "key".to_string(),
                reason: format!("not valid base64url: {}", e),
            })?;
        let bytes: [u8; KEY_LEN] =
            bytes
                .try_into()
                .map_err(|v: Vec<u8>| ShroudError::InvalidInput {
                    parameter: "key".to_string(),
                    reason: format!("expected {} bytes, got {}", KEY_LEN, v.len()),
                })?;
        Ok(Self(bytes))
    }

    /// Encodes the key for transport across a text boundary.
    pub fn to_base64(&self) -> String {
        URL_SAFE.encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for RedactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RedactionKey(..)")
    }
}

/// Encrypts one fragment plaintext into a transportable envelope.
pub fn encrypt_fragment(key: &RedactionKey, plaintext: &str) -> ShroudResult<String> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|_| ShroudError::CipherFailure)?;

    let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ciphertext);
    Ok(URL_SAFE.encode(payload))
}

/// Decrypts a fragment envelope.
///
/// Malformed base64, payloads shorter than the nonce, and authentication
/// failures (wrong key, flipped bits) all return the same
/// [`ShroudError::CipherFailure`] with no further detail.
pub fn decrypt_fragment(key: &RedactionKey, envelope: &str) -> ShroudResult<String> {
    let payload = URL_SAFE
        .decode(envelope)
        .map_err(|_| ShroudError::CipherFailure)?;
    if payload.len() < NONCE_LEN {
        return Err(ShroudError::CipherFailure);
    }

    let (nonce, ciphertext) = payload.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| ShroudError::CipherFailure)?;

    String::from_utf8(plaintext).map_err(|_| ShroudError::CipherFailure)
}
