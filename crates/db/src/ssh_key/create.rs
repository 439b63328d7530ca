use anyhow::{Context, Result, anyhow};
use shared::data::DbSshKey;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Create an ssh key record. The unique indexes on `key_id` and `name`
/// reject duplicates.
pub async fn create_ssh_key(
    db: &Surreal<Any>,
    key_id: &str,
    name: &str,
    pubkey: &str,
) -> Result<DbSshKey> {
    let key: Option<DbSshKey> = db
        .create("ssh_key")
        .content(DbSshKey {
            id: None,
            key_id: key_id.to_string(),
            name: name.to_string(),
            pubkey: pubkey.to_string(),
        })
        .await
        .context(format!("Failed to create ssh key: {name}"))?;

    key.ok_or_else(|| anyhow!("Ssh key was not created: {name}"))
}
