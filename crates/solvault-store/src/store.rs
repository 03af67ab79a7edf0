use crate::error::StoreError;
use crate::record::VaultRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the vault record inside the store directory.
const VAULT_FILE: &str = "vault.json";

/// Scratch name used to make `save` atomic.
const VAULT_TMP_FILE: &str = "vault.json.tmp";

/// Durable store for a single vault record.
///
/// Explicitly constructed with its root directory; callers own the
/// lifecycle. Exactly one record exists per directory — `save` replaces,
/// never merges.
#[derive(Debug, Clone)]
pub struct VaultStore {
    dir: PathBuf,
}

impl VaultStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn vault_path(&self) -> PathBuf {
        self.dir.join(VAULT_FILE)
    }

    /// Persist `record`, replacing any existing one.
    ///
    /// The record is written to a scratch file and renamed into place,
    /// so a failed write never leaves a readable half-record.
    pub fn save(&self, record: &VaultRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let tmp_path = self.dir.join(VAULT_TMP_FILE);
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, self.vault_path())?;

        tracing::debug!("Vault record persisted to {}", self.vault_path().display());
        Ok(())
    }

    /// Load the record, or `None` if no vault exists.
    ///
    /// A file that exists but does not parse is [`StoreError::Corrupt`];
    /// this never returns a partially-populated record.
    pub fn load(&self) -> Result<Option<VaultRecord>, StoreError> {
        let json = match fs::read_to_string(self.vault_path()) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record = serde_json::from_str(&json)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        Ok(Some(record))
    }

    /// Whether a vault record exists, without reading its contents.
    pub fn exists(&self) -> bool {
        self.vault_path().exists()
    }

    /// Delete the record. Idempotent: removing a nonexistent vault is
    /// not an error.
    pub fn remove(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.vault_path()) {
            Ok(()) => {
                tracing::info!("Vault record deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The directory this store is rooted at.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
