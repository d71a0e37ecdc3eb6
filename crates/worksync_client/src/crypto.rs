//! Payload encryption using AES-256-GCM keyed by a passphrase.
//!
//! The remote service stores and forwards ciphertext opaquely; only clients
//! holding the passphrase can read the payload. There is no key exchange:
//! the key is derived from the passphrase and a per-message salt.
//!
//! ## Payload format
//!
//! `salt (16 bytes) || nonce (12 bytes) || ciphertext || tag (16 bytes)`
//!
//! A fresh random salt and nonce are generated for every encryption, so the
//! same plaintext never produces the same ciphertext twice. The GCM tag
//! authenticates the payload: a wrong passphrase or a tampered byte fails
//! decryption instead of silently yielding garbage.

use crate::error::{ClientError, ClientResult};
use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Size of the AES-256 key in bytes.
const KEY_SIZE: usize = 32;
/// Size of the per-message salt in bytes.
pub const SALT_SIZE: usize = 16;
/// Size of the GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;
/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Fixed HKDF info string binding derived keys to this payload format.
const HKDF_INFO: &[u8] = b"worksync-payload-key-v1";

/// Symmetric payload cipher keyed by a passphrase.
///
/// Bound to the remote client at construction time iff a non-empty
/// passphrase is configured.
pub struct PassphraseCipher {
    passphrase: Zeroizing<Vec<u8>>,
}

impl PassphraseCipher {
    /// Creates a cipher from a passphrase.
    #[must_use]
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: Zeroizing::new(passphrase.into().into_bytes()),
        }
    }

    /// Derives the AES-256 key for a given salt via HKDF-SHA256.
    fn derive_key(&self, salt: &[u8]) -> ClientResult<Zeroizing<[u8; KEY_SIZE]>> {
        let hk = Hkdf::<Sha256>::new(Some(salt), &self.passphrase);
        let mut key = [0u8; KEY_SIZE];
        hk.expand(HKDF_INFO, &mut key)
            .map_err(|_| ClientError::Encryption("HKDF expand failed".into()))?;
        Ok(Zeroizing::new(key))
    }

    /// Encrypts payload bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encryption`] if key derivation or the AEAD
    /// operation fails.
    pub fn encrypt(&self, plaintext: &[u8]) -> ClientResult<Vec<u8>> {
        let mut salt = [0u8; SALT_SIZE];
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut salt);
        rand::thread_rng().fill_bytes(&mut nonce_bytes);

        let key = self.derive_key(&salt)?;
        let cipher = Aes256Gcm::new(GenericArray::from_slice(key.as_slice()));
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| ClientError::Encryption("AEAD encryption failed".into()))?;

        let mut result = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + ciphertext.len());
        result.extend_from_slice(&salt);
        result.extend_from_slice(&nonce_bytes);
        result.extend(ciphertext);
        Ok(result)
    }

    /// Decrypts payload bytes produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decryption`] if the payload is truncated, was
    /// produced with a different passphrase, or has been tampered with.
    pub fn decrypt(&self, payload: &[u8]) -> ClientResult<Vec<u8>> {
        if payload.len() < SALT_SIZE + NONCE_SIZE + TAG_SIZE {
            return Err(ClientError::Decryption("payload too short".into()));
        }

        let (salt, rest) = payload.split_at(SALT_SIZE);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

        let key = self
            .derive_key(salt)
            .map_err(|_| ClientError::Decryption("key derivation failed".into()))?;
        let cipher = Aes256Gcm::new(GenericArray::from_slice(key.as_slice()));
        let nonce = Nonce::from_slice(nonce_bytes);

        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| ClientError::Decryption("passphrase mismatch or corrupted payload".into()))
    }
}

impl std::fmt::Debug for PassphraseCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassphraseCipher")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}
