use crate::error::CryptoError;
use ed25519_dalek::{Signer, Verifier};
use solvault_types::{Pubkey, Signature};
use std::fmt;

/// Ed25519 keypair for transaction signing.
/// Secret key material is zeroized on drop.
pub struct Keypair {
    signing_key: ed25519_dalek::SigningKey,
}

impl Keypair {
    /// 64-byte export layout: 32-byte secret seed followed by the
    /// 32-byte public key.
    pub const SECRET_LEN: usize = 64;

    /// Create from a 32-byte private seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Create from the 64-byte secret ‖ public layout. Fails if the
    /// public half does not match the secret half.
    pub fn from_bytes(bytes: &[u8; 64]) -> Result<Self, CryptoError> {
        let signing_key = ed25519_dalek::SigningKey::from_keypair_bytes(bytes)
            .map_err(|_| CryptoError::InvalidKeypairBytes)?;
        Ok(Self { signing_key })
    }

    /// Get the public key
    pub fn pubkey(&self) -> Pubkey {
        Pubkey::from_bytes(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::from_bytes(self.signing_key.sign(message).to_bytes())
    }

    /// Export the 64-byte secret ‖ public bytes (CAUTION: sensitive)
    pub fn to_bytes(&self) -> [u8; 64] {
        self.signing_key.to_keypair_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", self.pubkey())
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: self.signing_key.clone(),
        }
    }
}

/// Verify an ed25519 signature.
pub fn verify(
    pubkey: &Pubkey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), CryptoError> {
    let vk = ed25519_dalek::VerifyingKey::from_bytes(pubkey.as_bytes())
        .map_err(|_| CryptoError::InvalidPublicKey)?;
    let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    vk.verify(message, &sig)
        .map_err(|_| CryptoError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_from_seed_is_deterministic() {
        let seed = [42u8; 32];
        let kp1 = Keypair::from_seed(&seed);
        let kp2 = Keypair::from_seed(&seed);

        assert_eq!(kp1.pubkey(), kp2.pubkey());
        assert_eq!(kp1.to_bytes(), kp2.to_bytes());
    }

    #[test]
    fn test_sign_and_verify() {
        let keypair = Keypair::from_seed(&[7u8; 32]);
        let message = b"transfer 1000 lamports";

        let signature = keypair.sign(message);
        assert!(verify(&keypair.pubkey(), message, &signature).is_ok());

        let result = verify(&keypair.pubkey(), b"different message", &signature);
        assert_eq!(result, Err(CryptoError::VerificationFailed));
    }

    #[test]
    fn test_bytes_round_trip() {
        let kp = Keypair::from_seed(&[9u8; 32]);
        let bytes = kp.to_bytes();
        assert_eq!(bytes.len(), Keypair::SECRET_LEN);

        let restored = Keypair::from_bytes(&bytes).unwrap();
        assert_eq!(restored.pubkey(), kp.pubkey());
    }

    #[test]
    fn test_from_bytes_rejects_mismatched_public_half() {
        let kp = Keypair::from_seed(&[9u8; 32]);
        let mut bytes = kp.to_bytes();
        bytes[63] ^= 0xff;

        let err = Keypair::from_bytes(&bytes).unwrap_err();
        assert_eq!(err, CryptoError::InvalidKeypairBytes);
    }

    #[test]
    fn test_clone_signs_identically() {
        let kp = Keypair::from_seed(&[5u8; 32]);
        let clone = kp.clone();
        let msg = b"msg";
        assert_eq!(kp.sign(msg), clone.sign(msg));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let kp = Keypair::from_seed(&[5u8; 32]);
        let rendered = format!("{:?}", kp);
        assert!(rendered.starts_with("Keypair("));
        assert!(!rendered.contains("05 05"));
    }
}
