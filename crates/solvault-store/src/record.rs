use crate::error::StoreError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use solvault_types::Pubkey;

/// Durable representation of one wallet: the encrypted secret key plus
/// the cipher parameters needed to open it, all textually encoded.
///
/// Immutable once written — re-keying produces a fresh record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VaultRecord {
    /// base64 AES-256-GCM ciphertext (decrypts to the 64-byte secret)
    pub ciphertext: String,
    /// base64 12-byte GCM nonce
    pub iv: String,
    /// base64 16-byte PBKDF2 salt
    pub salt: String,
    /// base58 address of the key sealed inside
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

impl VaultRecord {
    pub fn new(
        ciphertext: &[u8],
        nonce: &[u8; 12],
        salt: &[u8; 16],
        pubkey: &Pubkey,
    ) -> Self {
        Self {
            ciphertext: BASE64.encode(ciphertext),
            iv: BASE64.encode(nonce),
            salt: BASE64.encode(salt),
            public_key: pubkey.to_base58(),
        }
    }

    pub fn ciphertext_bytes(&self) -> Result<Vec<u8>, StoreError> {
        BASE64
            .decode(&self.ciphertext)
            .map_err(|e| invalid("ciphertext", e))
    }

    pub fn nonce_bytes(&self) -> Result<[u8; 12], StoreError> {
        let bytes = BASE64.decode(&self.iv).map_err(|e| invalid("iv", e))?;
        bytes
            .try_into()
            .map_err(|_| invalid("iv", "expected 12 bytes"))
    }

    pub fn salt_bytes(&self) -> Result<[u8; 16], StoreError> {
        let bytes = BASE64.decode(&self.salt).map_err(|e| invalid("salt", e))?;
        bytes
            .try_into()
            .map_err(|_| invalid("salt", "expected 16 bytes"))
    }

    pub fn pubkey(&self) -> Result<Pubkey, StoreError> {
        self.public_key
            .parse()
            .map_err(|e| invalid("publicKey", e))
    }
}

fn invalid(field: &'static str, reason: impl ToString) -> StoreError {
    StoreError::InvalidField {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VaultRecord {
        VaultRecord::new(
            &[1u8; 80],
            &[2u8; 12],
            &[3u8; 16],
            &Pubkey::from_bytes([4u8; 32]),
        )
    }

    #[test]
    fn test_field_round_trips() {
        let record = sample();
        assert_eq!(record.ciphertext_bytes().unwrap(), vec![1u8; 80]);
        assert_eq!(record.nonce_bytes().unwrap(), [2u8; 12]);
        assert_eq!(record.salt_bytes().unwrap(), [3u8; 16]);
        assert_eq!(record.pubkey().unwrap(), Pubkey::from_bytes([4u8; 32]));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"ciphertext\""));
        assert!(json.contains("\"iv\""));
        assert!(json.contains("\"salt\""));
        assert!(json.contains("\"publicKey\""));
    }

    #[test]
    fn test_bad_base64_is_invalid_field() {
        let mut record = sample();
        record.iv = "not base64!!!".to_string();
        assert!(matches!(
            record.nonce_bytes(),
            Err(StoreError::InvalidField { field: "iv", .. })
        ));
    }

    #[test]
    fn test_wrong_nonce_length_is_invalid_field() {
        let mut record = sample();
        record.iv = BASE64.encode([0u8; 8]);
        assert!(matches!(
            record.nonce_bytes(),
            Err(StoreError::InvalidField { field: "iv", .. })
        ));
    }

    #[test]
    fn test_bad_pubkey_is_invalid_field() {
        let mut record = sample();
        record.public_key = "tooshort".to_string();
        assert!(matches!(
            record.pubkey(),
            Err(StoreError::InvalidField {
                field: "publicKey",
                ..
            })
        ));
    }
}
