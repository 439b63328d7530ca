//! The delete-machine operation: tear down the domain, best-effort disk
//! cleanup, then remove the catalog rows (interfaces cascade).

use shared::Error;
use shared::data::{ActivityKind, MachineState};

use crate::daemon::state::AppState;
use crate::services::disk;

pub async fn delete_machine(state: &AppState, needle: &str) -> Result<(), Error> {
    let machine = db::resolve_machine(&state.db, needle)
        .await
        .map_err(Error::Persistence)?
        .ok_or_else(|| Error::NotFound(format!("machine {needle}")))?;
    let machine_id = machine.machine_id.clone();

    let conn = state.qemu.connect().map_err(Error::Hypervisor)?;

    if let Some(domain) = libvirt::lookup_domain(&conn, &machine_id) {
        let running = libvirt::domain_state(&conn, &machine_id)
            .map(|s| s == MachineState::Running)
            .unwrap_or(false);
        if running {
            libvirt::stop_domain(&conn, &machine_id).map_err(Error::Hypervisor)?;
        }
        libvirt::undefine_domain(&domain).map_err(Error::Hypervisor)?;
        tracing::debug!(machine_id = %machine_id, "Undefined domain");
    } else {
        tracing::warn!(machine_id = %machine_id, "Machine has no domain, removing catalog rows only");
    }

    disk::remove_disks(&state.config.pool_dir, &machine_id).await;

    db::delete_machine(&state.db, &machine_id)
        .await
        .map_err(Error::Persistence)?;

    tracing::info!(machine = %machine.name, machine_id = %machine_id, "Deleted machine");

    state.activity.record(ActivityKind::MachineDeleted, &machine_id);

    Ok(())
}
