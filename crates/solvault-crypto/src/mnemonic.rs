//! BIP-39 mnemonic handling: generation, validation, seed derivation.
//!
//! New wallets get a 12-word English phrase (128 bits of entropy plus a
//! 4-bit checksum). Validation accepts any standard phrase length so
//! that wallets created elsewhere can be imported.

use crate::error::CryptoError;
use bip39::Language;
use rand::rngs::OsRng;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Word count for newly generated phrases.
const GENERATED_WORDS: usize = 12;

/// A validated BIP-39 mnemonic phrase.
///
/// Shown to the user exactly once at creation time for backup, then
/// discarded. Never persisted. Debug output is redacted.
#[derive(Clone)]
pub struct Mnemonic(bip39::Mnemonic);

impl Mnemonic {
    /// Generate a fresh 12-word mnemonic from OS entropy.
    ///
    /// Infallible: an unavailable entropy source aborts the process
    /// rather than surfacing as a recoverable error.
    pub fn generate() -> Self {
        let inner = bip39::Mnemonic::generate_in_with(&mut OsRng, Language::English, GENERATED_WORDS)
            .expect("12 is a valid BIP-39 word count");
        Self(inner)
    }

    /// Parse a phrase after normalizing it (trim, lowercase, collapse
    /// internal whitespace).
    pub fn parse(phrase: &str) -> Result<Self, CryptoError> {
        let normalized = normalize(phrase);
        bip39::Mnemonic::parse_in_normalized(Language::English, &normalized)
            .map(Self)
            .map_err(|_| CryptoError::InvalidMnemonic)
    }

    /// Wordlist-membership and checksum predicate. Never errors.
    pub fn validate(phrase: &str) -> bool {
        Self::parse(phrase).is_ok()
    }

    /// The space-separated phrase.
    pub fn phrase(&self) -> String {
        self.0.to_string()
    }

    pub fn word_count(&self) -> usize {
        self.0.word_count()
    }

    /// Derive the 64-byte seed (PBKDF2-HMAC-SHA512, 2048 rounds, empty
    /// passphrase). Deterministic.
    pub fn to_seed(&self) -> Seed {
        Seed(self.0.to_seed(""))
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic({} words, redacted)", self.word_count())
    }
}

fn normalize(phrase: &str) -> String {
    phrase
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 64-byte BIP-39 seed. Exists only for the duration of a derivation;
/// zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    pub const LEN: usize = 64;

    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(redacted)")
    }
}
