use thiserror::Error;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CryptoError {
    #[error("Invalid mnemonic phrase")]
    InvalidMnemonic,

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Cipher unavailable: {0}")]
    CipherUnavailable(String),

    /// Authentication failure on decrypt. Deliberately carries no
    /// detail: wrong password and corrupted data must stay
    /// indistinguishable to the caller.
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Invalid keypair bytes")]
    InvalidKeypairBytes,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Signature verification failed")]
    VerificationFailed,
}
