use anyhow::{Context, Result};
use shared::data::{DbInterface, DbMachine};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use crate::schema::INTERFACE_UNIQUE_INDEX;

/// Persist a machine and its interfaces in a single transaction.
///
/// The interfaces carry addresses picked by the allocator from a lock-free
/// read of the interface table, so a concurrent create on the same network
/// can collide on `(network_id, ipv4)`. The unique index aborts the whole
/// transaction in that case; the caller detects it with
/// [`is_interface_collision`] and re-allocates.
pub async fn create_machine(
    db: &Surreal<Any>,
    machine: DbMachine,
    interfaces: Vec<DbInterface>,
) -> Result<()> {
    let machine_id = machine.machine_id.clone();

    db.query(
        "BEGIN TRANSACTION;
         CREATE machine CONTENT $machine;
         INSERT INTO interface $interfaces;
         COMMIT TRANSACTION;",
    )
    .bind(("machine", machine))
    .bind(("interfaces", interfaces))
    .await
    .context(format!("Failed to persist machine: {machine_id}"))?
    .check()
    .context(format!("Machine transaction was not committed: {machine_id}"))?;

    Ok(())
}

/// Whether a machine-create failure was an address-uniqueness collision
/// (as opposed to a genuine store failure).
pub fn is_interface_collision(err: &anyhow::Error) -> bool {
    format!("{err:#}").contains(INTERFACE_UNIQUE_INDEX)
}
