use anyhow::{Context, Result};
use shared::data::DbSshKey;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Get an ssh key by its business uuid. `Ok(None)` means the key does not
/// exist; `Err` is a store failure.
pub async fn get_ssh_key(db: &Surreal<Any>, key_id: &str) -> Result<Option<DbSshKey>> {
    let mut response = db
        .query("SELECT * FROM ONLY ssh_key WHERE key_id = $key_id LIMIT 1")
        .bind(("key_id", key_id.to_string()))
        .await
        .context(format!("Failed to query ssh key: {key_id}"))?;

    let key: Option<DbSshKey> = response.take(0)?;
    Ok(key)
}

/// List all ssh keys. Unordered.
pub async fn list_ssh_keys(db: &Surreal<Any>) -> Result<Vec<DbSshKey>> {
    let keys: Vec<DbSshKey> = db
        .select("ssh_key")
        .await
        .context("Failed to list ssh keys")?;

    Ok(keys)
}
