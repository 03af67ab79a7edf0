//! Password vault cipher: PBKDF2-HMAC-SHA256 key stretching in front of
//! AES-256-GCM.
//!
//! The iteration count makes each unlock cost hundreds of milliseconds
//! of CPU. Distinct from the 2048 rounds the BIP-39 seed KDF mandates —
//! that one is fixed by the standard, this one is a password-stretching
//! parameter.

use crate::error::CryptoError;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

/// PBKDF2 rounds for the vault key.
pub const PBKDF2_ITERATIONS: u32 = 250_000;

/// Random salt length in bytes.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Output of [`encrypt`]: everything the vault record needs to persist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedVault {
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_LEN],
    pub salt: [u8; SALT_LEN],
}

/// Encrypt `plaintext` under a key stretched from `password` and a
/// fresh random salt, with a fresh random nonce.
pub fn encrypt(password: &str, plaintext: &[u8]) -> Result<SealedVault, CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut nonce);

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new_from_slice(&*key)
        .map_err(|e| CryptoError::CipherUnavailable(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::CipherUnavailable(e.to_string()))?;

    Ok(SealedVault {
        ciphertext,
        nonce,
        salt,
    })
}

/// Re-derive the key from `password` and `salt`, then decrypt and
/// authenticate.
///
/// Fails with [`CryptoError::DecryptionFailed`] on any authentication
/// failure — wrong password, corrupted ciphertext and tampering are
/// indistinguishable by design.
pub fn decrypt(
    password: &str,
    ciphertext: &[u8],
    nonce: &[u8; NONCE_LEN],
    salt: &[u8; SALT_LEN],
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let key = derive_key(password, salt);
    let cipher = Aes256Gcm::new_from_slice(&*key)
        .map_err(|e| CryptoError::CipherUnavailable(e.to_string()))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)?;

    Ok(Zeroizing::new(plaintext))
}

/// PBKDF2-HMAC-SHA256 over password and salt. The derived key lives
/// only for the duration of one encrypt/decrypt call.
fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> Zeroizing<[u8; 32]> {
    let mut key = Zeroizing::new([0u8; 32]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut *key);
    key
}
