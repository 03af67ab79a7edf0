use crate::error::TypesError;
use std::fmt;

/// Ed25519 signature (64 bytes) — attached to submitted transactions.
/// Display format: base58, matching how the ledger reports transaction ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; 64]);

impl Signature {
    pub const LEN: usize = 64;

    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, TypesError> {
        if slice.len() != Self::LEN {
            return Err(TypesError::InvalidSignatureLength {
                expected: Self::LEN,
                actual: slice.len(),
            });
        }
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; 64])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0x{}...)", &hex::encode(&self.0[..8]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_round_trip() {
        let sig = Signature::from_bytes([1u8; 64]);
        assert_eq!(sig.as_bytes(), &[1u8; 64]);
        assert!(!sig.is_zero());

        let zero = Signature::default();
        assert!(zero.is_zero());
    }

    #[test]
    fn test_from_slice_wrong_length() {
        let err = Signature::from_slice(&[1u8; 63]).unwrap_err();
        assert_eq!(
            err,
            TypesError::InvalidSignatureLength {
                expected: 64,
                actual: 63
            }
        );
    }
}
