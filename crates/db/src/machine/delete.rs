use anyhow::{Context, Result};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Delete a machine and cascade its interfaces in one transaction.
pub async fn delete_machine(db: &Surreal<Any>, machine_id: &str) -> Result<()> {
    db.query(
        "BEGIN TRANSACTION;
         DELETE interface WHERE machine_id = $machine_id;
         DELETE machine WHERE machine_id = $machine_id;
         COMMIT TRANSACTION;",
    )
    .bind(("machine_id", machine_id.to_string()))
    .await
    .context(format!("Failed to delete machine: {machine_id}"))?
    .check()
    .context(format!("Machine delete was not committed: {machine_id}"))?;

    Ok(())
}
