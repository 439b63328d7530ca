use anyhow::{Context, Result};
use shared::data::DbSshKey;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Delete an ssh key by its business uuid. Returns whether a record was
/// removed. The caller is responsible for rejecting deletion while the key
/// is still referenced by a machine.
pub async fn delete_ssh_key(db: &Surreal<Any>, key_id: &str) -> Result<bool> {
    let deleted: Vec<DbSshKey> = db
        .query("DELETE ssh_key WHERE key_id = $key_id RETURN BEFORE")
        .bind(("key_id", key_id.to_string()))
        .await
        .context(format!("Failed to delete ssh key: {key_id}"))?
        .take(0)?;

    Ok(!deleted.is_empty())
}
