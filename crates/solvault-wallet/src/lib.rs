//! Solvault Wallet - The keypair session.
//!
//! A [`WalletSession`] ties the other crates together: it creates or
//! imports a wallet, seals the secret key into the vault store, and —
//! after a password unlock — holds the only in-memory copy of the
//! keypair, exposing signing and export until locked.

pub mod backup;
pub mod error;
pub mod session;

pub use backup::WalletBackup;
pub use error::WalletError;
pub use session::WalletSession;
