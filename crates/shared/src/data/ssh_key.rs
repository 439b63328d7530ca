use serde::{Deserialize, Serialize};
use surrealdb_types::RecordId;

/// A public key injected into guests at first boot. The key material is
/// opaque text in whatever format the guest's sshd accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbSshKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub key_id: String,
    pub name: String,
    pub pubkey: String,
}
