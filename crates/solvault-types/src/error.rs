use thiserror::Error;

/// Errors that can occur in type operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    #[error("Invalid public key length: expected {expected}, got {actual}")]
    InvalidPubkeyLength { expected: usize, actual: usize },

    #[error("Invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("Invalid blockhash length: expected {expected}, got {actual}")]
    InvalidBlockhashLength { expected: usize, actual: usize },

    #[error("Invalid base58 string: {0}")]
    InvalidBase58(String),

    #[error("Too many accounts in message: {0}")]
    TooManyAccounts(usize),

    #[error("Instruction references an account missing from the message")]
    MissingAccount,
}

impl From<bs58::decode::Error> for TypesError {
    fn from(e: bs58::decode::Error) -> Self {
        TypesError::InvalidBase58(e.to_string())
    }
}
