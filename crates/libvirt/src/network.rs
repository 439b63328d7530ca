use anyhow::Result;
use virt::connect::Connect;
use virt::network::Network;

/// Hypervisor-managed NAT network backing a catalog network in NAT mode.
/// Both the libvirt uuid and name are the catalog network's uuid so lookup
/// needs no extra mapping.
pub struct NatNetwork {
    pub network_id: String,
    pub bridge_name: String,
}

impl NatNetwork {
    /// Define, start and autostart the NAT network.
    pub fn create(&self, conn: &Connect) -> Result<Network> {
        let network_id = &self.network_id;
        let bridge_name = &self.bridge_name;
        let network_xml = format!(
            r#"
      <network>
        <name>{network_id}</name>
        <uuid>{network_id}</uuid>
        <forward mode='nat'>
          <nat>
            <port start='1024' end='65535'/>
          </nat>
        </forward>
        <bridge name='{bridge_name}' stp='on' delay='0'/>
      </network>
      "#
        );

        let network = Network::define_xml(conn, &network_xml)?;
        network.create()?;
        network.set_autostart(true)?;

        tracing::info!(network = %self.network_id, bridge = %self.bridge_name, "Created NAT network");

        Ok(network)
    }
}

/// Look up a hypervisor network by the catalog network uuid. `None` when
/// the hypervisor does not know it.
pub fn lookup_network(conn: &Connect, network_id: &str) -> Option<Network> {
    Network::lookup_by_uuid_string(conn, network_id).ok()
}

/// Whether the hypervisor network is currently active.
pub fn is_network_active(network: &Network) -> Result<bool> {
    Ok(network.is_active()?)
}

/// Activate a defined but inactive hypervisor network.
pub fn activate_network(network: &Network) -> Result<()> {
    network.create()?;
    Ok(())
}
