use anyhow::{Context, Result};
use shared::data::DbNetwork;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Get a network by its business uuid. `Ok(None)` means the network does
/// not exist; `Err` is a store failure.
pub async fn get_network(db: &Surreal<Any>, network_id: &str) -> Result<Option<DbNetwork>> {
    let mut response = db
        .query("SELECT * FROM ONLY network WHERE network_id = $network_id LIMIT 1")
        .bind(("network_id", network_id.to_string()))
        .await
        .context(format!("Failed to query network: {network_id}"))?;

    let network: Option<DbNetwork> = response.take(0)?;
    Ok(network)
}

/// Get a network by its unique name.
pub async fn get_network_by_name(db: &Surreal<Any>, name: &str) -> Result<Option<DbNetwork>> {
    let mut response = db
        .query("SELECT * FROM ONLY network WHERE name = $name LIMIT 1")
        .bind(("name", name.to_string()))
        .await
        .context(format!("Failed to query network by name: {name}"))?;

    let network: Option<DbNetwork> = response.take(0)?;
    Ok(network)
}

/// List all networks. Unordered.
pub async fn list_networks(db: &Surreal<Any>) -> Result<Vec<DbNetwork>> {
    let networks: Vec<DbNetwork> = db
        .select("network")
        .await
        .context("Failed to list networks")?;

    Ok(networks)
}
