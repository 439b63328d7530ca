use anyhow::{Context, Result};
use shared::data::DbMachine;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Get a machine by its business uuid. `Ok(None)` means the machine does
/// not exist; `Err` is a store failure.
pub async fn get_machine(db: &Surreal<Any>, machine_id: &str) -> Result<Option<DbMachine>> {
    let mut response = db
        .query("SELECT * FROM ONLY machine WHERE machine_id = $machine_id LIMIT 1")
        .bind(("machine_id", machine_id.to_string()))
        .await
        .context(format!("Failed to query machine: {machine_id}"))?;

    let machine: Option<DbMachine> = response.take(0)?;
    Ok(machine)
}

/// Resolve a machine from caller input that may be either its uuid or its
/// unique name.
pub async fn resolve_machine(db: &Surreal<Any>, needle: &str) -> Result<Option<DbMachine>> {
    let mut response = db
        .query("SELECT * FROM ONLY machine WHERE machine_id = $needle OR name = $needle LIMIT 1")
        .bind(("needle", needle.to_string()))
        .await
        .context(format!("Failed to resolve machine: {needle}"))?;

    let machine: Option<DbMachine> = response.take(0)?;
    Ok(machine)
}

/// List all machines. Unordered.
pub async fn list_machines(db: &Surreal<Any>) -> Result<Vec<DbMachine>> {
    let machines: Vec<DbMachine> = db
        .select("machine")
        .await
        .context("Failed to list machines")?;

    Ok(machines)
}
