use crate::backup::WalletBackup;
use crate::error::WalletError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use solvault_crypto::{cipher, hd, Keypair, Mnemonic};
use solvault_store::{StoreError, VaultRecord, VaultStore};
use solvault_types::{Blockhash, Message, Pubkey, Transaction};
use zeroize::Zeroizing;

/// Account index every session derives at. The derivation code accepts
/// other indices; no session surface exposes them.
const ACCOUNT: u32 = 0;

/// The in-memory wallet session.
///
/// Owns the injected [`VaultStore`] and, while unlocked, the only live
/// copy of the keypair. Unlock/lock are `&mut self` state transitions,
/// so concurrent attempts are serialized by the borrow rules; nothing
/// outside this struct ever holds raw secret bytes beyond the scope of
/// a single encrypt or export call.
#[derive(Debug)]
pub struct WalletSession {
    store: VaultStore,
    keypair: Option<Keypair>,
}

impl WalletSession {
    /// Start a locked session over `store`.
    pub fn new(store: VaultStore) -> Self {
        Self {
            store,
            keypair: None,
        }
    }

    /// Create a fresh wallet: generate a mnemonic, derive the account-0
    /// keypair, seal it under `password` and persist the record.
    ///
    /// Returns the mnemonic for the one-time backup display. It is not
    /// retained anywhere else.
    pub fn create(&mut self, password: &str) -> Result<Mnemonic, WalletError> {
        let mnemonic = Mnemonic::generate();
        let seed = mnemonic.to_seed();
        let keypair = hd::derive_keypair(&seed, ACCOUNT)?;
        self.seal_and_hold(keypair, password)?;
        Ok(mnemonic)
    }

    /// Import a wallet from an existing mnemonic phrase.
    pub fn import(&mut self, phrase: &str, password: &str) -> Result<Pubkey, WalletError> {
        let keypair = hd::derive_from_mnemonic(phrase, ACCOUNT)?;
        self.seal_and_hold(keypair, password)
    }

    /// Import a wallet from a previously exported base64 secret key.
    pub fn import_secret_key(
        &mut self,
        secret_base64: &str,
        password: &str,
    ) -> Result<Pubkey, WalletError> {
        let decoded = Zeroizing::new(
            BASE64
                .decode(secret_base64.trim())
                .map_err(|_| solvault_crypto::CryptoError::InvalidKeypairBytes)?,
        );
        let bytes: &[u8; 64] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| solvault_crypto::CryptoError::InvalidKeypairBytes)?;
        let keypair = Keypair::from_bytes(bytes)?;
        self.seal_and_hold(keypair, password)
    }

    /// Load the vault record, decrypt it with `password` and hold the
    /// reconstituted keypair.
    ///
    /// # Errors
    /// - [`WalletError::NoVaultFound`] if no record is persisted.
    /// - `DecryptionFailed` (via [`WalletError::Crypto`]) on wrong
    ///   password or tampered ciphertext — indistinguishable by design.
    /// - [`WalletError::CorruptVault`] if the record's fields do not
    ///   decode, the plaintext is not a 64-byte keypair, or the
    ///   embedded public key disagrees with the record.
    pub fn unlock(&mut self, password: &str) -> Result<Pubkey, WalletError> {
        let record = match self.store.load() {
            Ok(Some(record)) => record,
            Ok(None) => return Err(WalletError::NoVaultFound),
            Err(StoreError::Corrupt(_)) => return Err(WalletError::CorruptVault),
            Err(e) => return Err(e.into()),
        };

        let ciphertext = record.ciphertext_bytes().map_err(corrupt)?;
        let nonce = record.nonce_bytes().map_err(corrupt)?;
        let salt = record.salt_bytes().map_err(corrupt)?;
        let expected_pubkey = record.pubkey().map_err(corrupt)?;

        let plaintext = cipher::decrypt(password, &ciphertext, &nonce, &salt)?;
        let bytes: &[u8; 64] = plaintext
            .as_slice()
            .try_into()
            .map_err(|_| WalletError::CorruptVault)?;
        let keypair = Keypair::from_bytes(bytes).map_err(|_| WalletError::CorruptVault)?;

        if keypair.pubkey() != expected_pubkey {
            return Err(WalletError::CorruptVault);
        }

        tracing::info!("Wallet unlocked: {}", keypair.pubkey());
        let pubkey = keypair.pubkey();
        self.keypair = Some(keypair);
        Ok(pubkey)
    }

    /// Discard the in-memory keypair. The persisted vault is untouched.
    pub fn lock(&mut self) {
        if self.keypair.take().is_some() {
            tracing::info!("Wallet locked");
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.keypair.is_some()
    }

    /// Public key of the held keypair, if unlocked.
    pub fn pubkey(&self) -> Option<Pubkey> {
        self.keypair.as_ref().map(Keypair::pubkey)
    }

    /// Whether a vault record exists, unlocked or not.
    pub fn vault_exists(&self) -> bool {
        self.store.exists()
    }

    /// Base64 of the raw 64-byte secret, only while unlocked.
    ///
    /// The single most sensitive operation in the system: callers must
    /// never log, cache or transmit the result.
    pub fn export_secret(&self) -> Option<String> {
        self.keypair
            .as_ref()
            .map(|kp| BASE64.encode(kp.to_bytes()))
    }

    /// The fields of a backup export file, only while unlocked.
    pub fn export_backup(&self) -> Option<WalletBackup> {
        let keypair = self.keypair.as_ref()?;
        Some(WalletBackup {
            public_key: keypair.pubkey().to_base58(),
            secret_key_base64: BASE64.encode(keypair.to_bytes()),
        })
    }

    /// Serialized unsigned transfer message, for fee estimation against
    /// the ledger RPC.
    pub fn transfer_message(
        &self,
        to: &Pubkey,
        lamports: u64,
        recent_blockhash: Blockhash,
    ) -> Result<Vec<u8>, WalletError> {
        let (message, _) = self.build_transfer(to, lamports, recent_blockhash)?;
        Ok(message.serialize())
    }

    /// Build, sign and serialize a transfer of `lamports` to `to`.
    ///
    /// `recent_blockhash` comes from the ledger RPC collaborator; the
    /// session itself performs no network I/O, its contract ends at the
    /// signed bytes.
    pub fn sign_transfer(
        &self,
        to: &Pubkey,
        lamports: u64,
        recent_blockhash: Blockhash,
    ) -> Result<Vec<u8>, WalletError> {
        let (message, keypair) = self.build_transfer(to, lamports, recent_blockhash)?;
        let message_bytes = message.serialize();
        let signature = keypair.sign(&message_bytes);
        let transaction = Transaction::new(message, vec![signature]);
        Ok(transaction.serialize())
    }

    /// Lock the session and delete the persisted vault.
    pub fn remove_wallet(&mut self) -> Result<(), WalletError> {
        self.lock();
        self.store.remove()?;
        Ok(())
    }

    fn build_transfer(
        &self,
        to: &Pubkey,
        lamports: u64,
        recent_blockhash: Blockhash,
    ) -> Result<(Message, &Keypair), WalletError> {
        let keypair = self.keypair.as_ref().ok_or(WalletError::NoActiveSession)?;
        if to.is_zero() {
            return Err(WalletError::InvalidRecipient);
        }
        let message = Message::transfer(&keypair.pubkey(), to, lamports, recent_blockhash)?;
        Ok((message, keypair))
    }

    /// Seal `keypair` under `password`, persist the record (replacing
    /// any previous wallet) and hold the keypair unlocked.
    fn seal_and_hold(&mut self, keypair: Keypair, password: &str) -> Result<Pubkey, WalletError> {
        let pubkey = keypair.pubkey();
        let secret = Zeroizing::new(keypair.to_bytes());
        let sealed = cipher::encrypt(password, secret.as_slice())?;
        let record = VaultRecord::new(&sealed.ciphertext, &sealed.nonce, &sealed.salt, &pubkey);
        self.store.save(&record)?;

        tracing::info!("Vault created for {}", pubkey);
        self.keypair = Some(keypair);
        Ok(pubkey)
    }
}

fn corrupt(_: StoreError) -> WalletError {
    WalletError::CorruptVault
}
