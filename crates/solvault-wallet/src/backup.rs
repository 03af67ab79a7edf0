use serde::{Deserialize, Serialize};

/// Fields the surrounding application writes into a backup export file.
/// The secret is the full 64-byte key, base64 encoded — treat the whole
/// struct as secret material.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletBackup {
    pub public_key: String,
    pub secret_key_base64: String,
}
