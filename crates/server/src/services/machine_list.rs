//! Catalog views with live state filled in from the hypervisor.

use shared::Error;
use shared::data::{
    DbMachine, InterfaceView, ListMachinesResponse, MachineDetailsResponse, MachineState,
    MachineView, SshKeyView,
};

use crate::daemon::state::AppState;

/// Assemble the API view of one machine. `conn` is the shared libvirt
/// connection for the request; when it is unavailable the state is
/// reported as unknown rather than failing the listing.
async fn machine_view(
    state: &AppState,
    conn: Option<&libvirt::QemuConnection>,
    machine: &DbMachine,
) -> Result<MachineView, Error> {
    let interfaces = db::list_interfaces_by_machine(&state.db, &machine.machine_id)
        .await
        .map_err(Error::Persistence)?;

    let status = conn
        .and_then(|conn| libvirt::domain_state(conn, &machine.machine_id).ok())
        .unwrap_or(MachineState::Unknown);

    Ok(MachineView {
        id: machine.machine_id.clone(),
        name: machine.name.clone(),
        status,
        specs: machine.specs,
        networks: interfaces.iter().map(InterfaceView::from).collect(),
        image_id: machine.image_id.clone(),
        ssh_key_ids: machine.ssh_key_ids.clone(),
        user: machine.user.clone(),
    })
}

pub async fn list_machines(state: &AppState) -> Result<ListMachinesResponse, Error> {
    let machines = db::list_machines(&state.db)
        .await
        .map_err(Error::Persistence)?;

    // One connection for the whole listing; a connect failure degrades
    // every status to unknown instead of failing the call.
    let conn = match state.qemu.connect() {
        Ok(conn) => Some(conn),
        Err(e) => {
            tracing::warn!(error = %e, "Hypervisor unavailable, reporting unknown states");
            None
        }
    };

    let mut views = Vec::with_capacity(machines.len());
    for machine in &machines {
        views.push(machine_view(state, conn.as_ref(), machine).await?);
    }

    Ok(ListMachinesResponse { machines: views })
}

/// Details for one machine, addressed by uuid or name, with its ssh keys
/// preloaded.
pub async fn get_machine_details(
    state: &AppState,
    needle: &str,
) -> Result<MachineDetailsResponse, Error> {
    let machine = db::resolve_machine(&state.db, needle)
        .await
        .map_err(Error::Persistence)?
        .ok_or_else(|| Error::NotFound(format!("machine {needle}")))?;

    let conn = state.qemu.connect().ok();
    let view = machine_view(state, conn.as_ref(), &machine).await?;

    let mut ssh_keys = Vec::with_capacity(machine.ssh_key_ids.len());
    for key_id in &machine.ssh_key_ids {
        if let Some(key) = db::get_ssh_key(&state.db, key_id)
            .await
            .map_err(Error::Persistence)?
        {
            ssh_keys.push(SshKeyView::from(&key));
        }
    }

    Ok(MachineDetailsResponse {
        machine: view,
        ssh_keys,
    })
}
