//! Read operations for network interfaces.
//!
//! Interface rows are only ever written inside the machine-create
//! transaction and removed by the machine-delete cascade, so this module
//! has no create/delete counterpart.

use anyhow::{Context, Result};
use shared::data::DbInterface;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// List the interfaces attached to one machine.
pub async fn list_interfaces_by_machine(
    db: &Surreal<Any>,
    machine_id: &str,
) -> Result<Vec<DbInterface>> {
    let mut response = db
        .query("SELECT * FROM interface WHERE machine_id = $machine_id")
        .bind(("machine_id", machine_id.to_string()))
        .await
        .context(format!("Failed to list interfaces for machine: {machine_id}"))?;

    let interfaces: Vec<DbInterface> = response.take(0)?;
    Ok(interfaces)
}

/// List the interfaces allocated on one network. The allocator reads this
/// set to compute the blocked addresses.
pub async fn list_interfaces_by_network(
    db: &Surreal<Any>,
    network_id: &str,
) -> Result<Vec<DbInterface>> {
    let mut response = db
        .query("SELECT * FROM interface WHERE network_id = $network_id")
        .bind(("network_id", network_id.to_string()))
        .await
        .context(format!("Failed to list interfaces for network: {network_id}"))?;

    let interfaces: Vec<DbInterface> = response.take(0)?;
    Ok(interfaces)
}

/// Count the interfaces allocated on one network.
pub async fn count_interfaces_by_network(db: &Surreal<Any>, network_id: &str) -> Result<usize> {
    let mut response = db
        .query("SELECT count() FROM interface WHERE network_id = $network_id GROUP ALL")
        .bind(("network_id", network_id.to_string()))
        .await
        .context("Failed to count interfaces for network")?;

    let count: Option<usize> = response.take("count")?;
    Ok(count.unwrap_or(0))
}
