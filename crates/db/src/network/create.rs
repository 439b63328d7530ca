use anyhow::{Context, Result, anyhow};
use shared::data::DbNetwork;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Persist a network record. The caller has already validated the
/// addressing (subnet parses, gateway inside the subnet); the unique
/// indexes on `network_id` and `name` reject duplicates.
pub async fn create_network(db: &Surreal<Any>, network: DbNetwork) -> Result<DbNetwork> {
    let name = network.name.clone();

    let created: Option<DbNetwork> = db
        .create("network")
        .content(network)
        .await
        .context(format!("Failed to create network: {name}"))?;

    created.ok_or_else(|| anyhow!("Network was not created: {name}"))
}
