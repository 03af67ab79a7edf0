use thiserror::Error;

/// Errors that can occur in vault storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Vault store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The vault file exists but does not parse as a record. Never
    /// surfaced as a partially-populated record.
    #[error("Vault record is corrupt: {0}")]
    Corrupt(String),

    /// A record field fails to decode (bad base64/base58 or wrong
    /// decoded length).
    #[error("Invalid vault record field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}
