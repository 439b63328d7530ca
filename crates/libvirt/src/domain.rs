use anyhow::Result;
use virt::connect::Connect;
use virt::domain::Domain;
use virt::sys;

use shared::data::MachineState;

/// Define a persistent domain from XML. The domain is not started.
pub fn define_domain(conn: &Connect, xml: &str) -> Result<Domain> {
    let domain = Domain::define_xml(conn, xml)?;
    Ok(domain)
}

/// Look up a domain by the machine uuid. `None` when the hypervisor does
/// not know the domain.
pub fn lookup_domain(conn: &Connect, machine_id: &str) -> Option<Domain> {
    Domain::lookup_by_uuid_string(conn, machine_id).ok()
}

/// Start a defined domain.
pub fn start_domain(conn: &Connect, machine_id: &str) -> Result<()> {
    let domain = Domain::lookup_by_uuid_string(conn, machine_id)?;
    domain.create()?;
    Ok(())
}

/// Force power-off, the virtual equivalent of pulling the plug.
pub fn stop_domain(conn: &Connect, machine_id: &str) -> Result<()> {
    let domain = Domain::lookup_by_uuid_string(conn, machine_id)?;
    domain.destroy()?;
    Ok(())
}

/// Graceful reboot through the guest.
pub fn reboot_domain(conn: &Connect, machine_id: &str) -> Result<()> {
    let domain = Domain::lookup_by_uuid_string(conn, machine_id)?;
    domain.reboot(sys::VIR_DOMAIN_REBOOT_DEFAULT)?;
    Ok(())
}

/// Remove the domain definition from the hypervisor.
pub fn undefine_domain(domain: &Domain) -> Result<()> {
    domain.undefine()?;
    Ok(())
}

/// Read the machine state as the hypervisor reports it.
pub fn domain_state(conn: &Connect, machine_id: &str) -> Result<MachineState> {
    let domain = Domain::lookup_by_uuid_string(conn, machine_id)?;
    let (state, _reason) = domain.get_state()?;
    Ok(map_domain_state(state))
}

/// Total mapping from the hypervisor's domain state to [`MachineState`].
pub fn map_domain_state(state: sys::virDomainState) -> MachineState {
    match state {
        sys::VIR_DOMAIN_RUNNING => MachineState::Running,
        sys::VIR_DOMAIN_BLOCKED | sys::VIR_DOMAIN_CRASHED => MachineState::Crashed,
        sys::VIR_DOMAIN_PAUSED
        | sys::VIR_DOMAIN_PMSUSPENDED
        | sys::VIR_DOMAIN_SHUTDOWN
        | sys::VIR_DOMAIN_SHUTOFF => MachineState::Stopped,
        _ => MachineState::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_maps_to_running() {
        assert_eq!(map_domain_state(sys::VIR_DOMAIN_RUNNING), MachineState::Running);
    }

    #[test]
    fn halted_variants_map_to_stopped() {
        for state in [
            sys::VIR_DOMAIN_PAUSED,
            sys::VIR_DOMAIN_PMSUSPENDED,
            sys::VIR_DOMAIN_SHUTDOWN,
            sys::VIR_DOMAIN_SHUTOFF,
        ] {
            assert_eq!(map_domain_state(state), MachineState::Stopped);
        }
    }

    #[test]
    fn fault_variants_map_to_crashed() {
        assert_eq!(map_domain_state(sys::VIR_DOMAIN_BLOCKED), MachineState::Crashed);
        assert_eq!(map_domain_state(sys::VIR_DOMAIN_CRASHED), MachineState::Crashed);
    }

    #[test]
    fn mapping_is_total_over_unknown_values() {
        assert_eq!(map_domain_state(sys::VIR_DOMAIN_NOSTATE), MachineState::Unknown);
        // Values past the current enum range still map.
        assert_eq!(map_domain_state(255), MachineState::Unknown);
    }
}
