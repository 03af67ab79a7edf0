//! SLIP-0010 hardened Ed25519 key derivation.
//!
//! Walks the fixed account path `m/44'/501'/{account}'/0'` over a
//! BIP-39 seed. Every level is hardened; the 32 bytes produced at the
//! leaf become the Ed25519 private seed directly (full seed replacement
//! at each node, not BIP-32-style child-key tweaking).
//!
//! Reference: <https://github.com/satoshilabs/slips/blob/master/slip-0010.md>

use crate::error::CryptoError;
use crate::keypair::Keypair;
use crate::mnemonic::{Mnemonic, Seed};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroize;

type HmacSha512 = Hmac<Sha512>;

/// The hardened index offset (0x80000000) per BIP-32/SLIP-0010.
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key for master key generation per SLIP-0010 §2.
const MASTER_HMAC_KEY: &[u8] = b"ed25519 seed";

/// BIP-44 purpose level.
const PURPOSE: u32 = 44;

/// Registered coin type of the target ledger.
const COIN_TYPE: u32 = 501;

/// The derivation path for an account index, for display purposes.
pub fn derivation_path(account: u32) -> String {
    format!("m/{PURPOSE}'/{COIN_TYPE}'/{account}'/0'")
}

/// Derive the signing keypair for `account` from a BIP-39 seed.
///
/// Deterministic: the same seed and account index always produce the
/// same keypair. That determinism is the backup guarantee — a restored
/// mnemonic reproduces the original address.
pub fn derive_keypair(seed: &Seed, account: u32) -> Result<Keypair, CryptoError> {
    let (mut key, mut chain_code) = master_key_from_seed(seed.as_bytes())?;

    for index in [PURPOSE, COIN_TYPE, account, 0] {
        let (child_key, child_chain) = derive_hardened_child(&key, &chain_code, index)?;
        key.zeroize();
        chain_code.zeroize();
        key = child_key;
        chain_code = child_chain;
    }

    let keypair = Keypair::from_seed(&key);
    key.zeroize();
    chain_code.zeroize();

    Ok(keypair)
}

/// Convenience: validate a phrase, stretch it to a seed, derive.
///
/// Fails with [`CryptoError::InvalidMnemonic`] before touching any key
/// material if the phrase does not validate.
pub fn derive_from_mnemonic(phrase: &str, account: u32) -> Result<Keypair, CryptoError> {
    let mnemonic = Mnemonic::parse(phrase)?;
    let seed = mnemonic.to_seed();
    derive_keypair(&seed, account)
}

/// `I = HMAC-SHA512(key="ed25519 seed", data=seed)`;
/// left half is the master key, right half the chain code.
fn master_key_from_seed(seed: &[u8]) -> Result<([u8; 32], [u8; 32]), CryptoError> {
    let i = hmac_sha512(MASTER_HMAC_KEY, seed)?;
    Ok(split_halves(&i))
}

/// `I = HMAC-SHA512(key=chain_code, data=0x00 || parent_key || ser32(index | 0x80000000))`
fn derive_hardened_child(
    parent_key: &[u8; 32],
    parent_chain_code: &[u8; 32],
    index: u32,
) -> Result<([u8; 32], [u8; 32]), CryptoError> {
    let mut data = [0u8; 37];
    data[0] = 0x00;
    data[1..33].copy_from_slice(parent_key);
    data[33..37].copy_from_slice(&(index | HARDENED_OFFSET).to_be_bytes());

    let i = hmac_sha512(parent_chain_code, &data);
    data.zeroize();
    Ok(split_halves(&i?))
}

fn split_halves(i: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&i[..32]);
    chain_code.copy_from_slice(&i[32..]);
    (key, chain_code)
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64], CryptoError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| CryptoError::KeyDerivation(format!("HMAC-SHA512 key init: {e}")))?;
    mac.update(data);
    let result = mac.finalize().into_bytes();

    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    Ok(output)
}
