use solvault_crypto::CryptoError;
use solvault_store::StoreError;
use solvault_types::TypesError;
use thiserror::Error;

/// Errors that can occur in wallet session operations.
///
/// Every variant is recoverable; none should take the process down.
/// Unlock failures surface to users as a generic "incorrect password or
/// corrupted wallet" message; validation failures name the violated
/// precondition.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("No vault found")]
    NoVaultFound,

    /// The persisted record or its decrypted contents do not
    /// reconstitute a valid wallet.
    #[error("Vault is corrupt")]
    CorruptVault,

    #[error("No active session")]
    NoActiveSession,

    #[error("Invalid recipient address")]
    InvalidRecipient,

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Transaction build failed: {0}")]
    Transaction(#[from] TypesError),
}
