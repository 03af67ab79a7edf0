//! Solvault Crypto - Cryptographic primitives for the Solvault wallet engine.
//!
//! This crate provides:
//! - BIP-39 mnemonic generation, validation and seed derivation
//! - SLIP-0010 hardened Ed25519 HD key derivation
//! - Ed25519 keypairs (transaction signing)
//! - The password vault cipher (PBKDF2-HMAC-SHA256 + AES-256-GCM)

pub mod cipher;
pub mod error;
pub mod hd;
pub mod keypair;
pub mod mnemonic;

pub use cipher::{decrypt, encrypt, SealedVault};
pub use error::CryptoError;
pub use hd::{derivation_path, derive_from_mnemonic, derive_keypair};
pub use keypair::{verify, Keypair};
pub use mnemonic::{Mnemonic, Seed};
