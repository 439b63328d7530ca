use anyhow::{Context, Result};
use shared::data::DbNetwork;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Delete a network record by its business uuid. Returns whether a record
/// was removed. The caller rejects deletion while interfaces still
/// reference the network.
pub async fn delete_network(db: &Surreal<Any>, network_id: &str) -> Result<bool> {
    let deleted: Vec<DbNetwork> = db
        .query("DELETE network WHERE network_id = $network_id RETURN BEFORE")
        .bind(("network_id", network_id.to_string()))
        .await
        .context(format!("Failed to delete network: {network_id}"))?
        .take(0)?;

    Ok(!deleted.is_empty())
}
