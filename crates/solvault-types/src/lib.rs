//! Solvault Types - Core type definitions for the Solvault wallet engine.
//!
//! This crate provides the fundamental types used throughout Solvault:
//! - Public keys (32-byte Ed25519, base58 encoded)
//! - Signatures (64-byte Ed25519)
//! - Blockhashes (32-byte, base58 encoded)
//! - Transfer instructions, messages and transactions in the ledger's
//!   native wire format

pub mod blockhash;
pub mod error;
pub mod pubkey;
pub mod signature;
pub mod transaction;

pub use blockhash::Blockhash;
pub use error::TypesError;
pub use pubkey::Pubkey;
pub use signature::Signature;
pub use transaction::{transfer, AccountMeta, Instruction, Message, Transaction};

/// Lamports per SOL (the smallest indivisible unit of the native token).
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        transfer, AccountMeta, Blockhash, Instruction, Message, Pubkey, Signature, Transaction,
        TypesError, LAMPORTS_PER_SOL,
    };
}
