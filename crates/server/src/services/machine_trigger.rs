//! Lifecycle transitions on an existing machine.

use shared::Error;
use shared::data::{ActivityKind, MachineState, TriggerEvent, TriggerMachineResponse};

use crate::daemon::state::AppState;

pub async fn trigger_machine(
    state: &AppState,
    needle: &str,
    event: TriggerEvent,
) -> Result<TriggerMachineResponse, Error> {
    let kind = match event {
        TriggerEvent::Poweron => ActivityKind::MachinePoweron,
        TriggerEvent::Poweroff => ActivityKind::MachinePoweroff,
        TriggerEvent::Reboot => ActivityKind::MachineReboot,
        TriggerEvent::Unknown => {
            return Err(Error::InvalidArgument(format!("unknown event: {event}")));
        }
    };

    let machine = db::resolve_machine(&state.db, needle)
        .await
        .map_err(Error::Persistence)?
        .ok_or_else(|| Error::NotFound(format!("machine {needle}")))?;

    let conn = state.qemu.connect().map_err(Error::Hypervisor)?;

    match event {
        TriggerEvent::Poweron => libvirt::start_domain(&conn, &machine.machine_id),
        TriggerEvent::Poweroff => libvirt::stop_domain(&conn, &machine.machine_id),
        TriggerEvent::Reboot => libvirt::reboot_domain(&conn, &machine.machine_id),
        TriggerEvent::Unknown => unreachable!("rejected above"),
    }
    .map_err(Error::Hypervisor)?;

    let status =
        libvirt::domain_state(&conn, &machine.machine_id).unwrap_or(MachineState::Unknown);

    tracing::info!(
        machine = %machine.name,
        machine_id = %machine.machine_id,
        event = %event,
        status = %status,
        "Triggered machine"
    );

    state.activity.record(kind, &machine.machine_id);

    Ok(TriggerMachineResponse { status })
}
