//! The create-machine operation: validation, address allocation, catalog
//! persistence, disk materialization and domain startup, in that order.
//! The catalog commit happens before the host-side work; a later failure
//! leaves the row in place and is reported to the caller (delete-machine
//! cleans up).

use askama::Template;
use uuid::Uuid;

use shared::Error;
use shared::data::{
    ActivityKind, CreateMachineRequest, CreateMachineResponse, DbInterface, DbMachine, DbNetwork,
    DbSshKey,
};
use shared::konst::ALLOCATE_RETRY_LIMIT;
use shared::util::interface::guest_ifname;
use shared::util::user::is_valid_user;
use template::{
    CloudInitConfig, CloudInitNetworkStub, DomainInterface, DomainTemplate, InterfaceSnippet,
    InterfacesTemplate,
};

use crate::daemon::state::AppState;
use crate::services::{allocator, disk};

pub async fn create_machine(
    state: &AppState,
    request: CreateMachineRequest,
) -> Result<CreateMachineResponse, Error> {
    // ========================================================================
    // Preconditions, validated in order
    // ========================================================================
    if request.ssh_key_ids.is_empty() {
        return Err(Error::InvalidArgument(
            "at least one ssh key id is required".into(),
        ));
    }
    if request.network_ids.is_empty() {
        return Err(Error::InvalidArgument(
            "at least one network id is required".into(),
        ));
    }

    let image = db::get_image(&state.db, &request.image_id)
        .await
        .map_err(Error::Persistence)?
        .ok_or_else(|| Error::NotFound(format!("image {}", request.image_id)))?;

    let mut ssh_keys: Vec<DbSshKey> = Vec::with_capacity(request.ssh_key_ids.len());
    for key_id in &request.ssh_key_ids {
        let key = db::get_ssh_key(&state.db, key_id)
            .await
            .map_err(Error::Persistence)?
            .ok_or_else(|| Error::NotFound(format!("ssh key {key_id}")))?;
        ssh_keys.push(key);
    }

    let mut networks: Vec<DbNetwork> = Vec::with_capacity(request.network_ids.len());
    for network_id in &request.network_ids {
        let network = db::get_network(&state.db, network_id)
            .await
            .map_err(Error::Persistence)?
            .ok_or_else(|| Error::NotFound(format!("network {network_id}")))?;
        networks.push(network);
    }

    if !is_valid_user(&request.user) {
        return Err(Error::InvalidArgument(format!(
            "invalid user name: {}",
            request.user
        )));
    }

    if db::resolve_machine(&state.db, &request.name)
        .await
        .map_err(Error::Persistence)?
        .is_some()
    {
        return Err(Error::InvalidArgument(format!(
            "machine name already in use: {}",
            request.name
        )));
    }

    let machine_id = Uuid::new_v4().to_string();
    let machine = DbMachine {
        id: None,
        machine_id: machine_id.clone(),
        name: request.name.clone(),
        user: request.user.clone(),
        image_id: request.image_id.clone(),
        ssh_key_ids: request.ssh_key_ids.clone(),
        specs: request.specs,
    };

    // ========================================================================
    // Allocate addresses and persist, one transaction, bounded retry
    // ========================================================================
    let mut attempt = 0;
    let interfaces: Vec<DbInterface> = loop {
        let mut interfaces = Vec::with_capacity(networks.len());
        for network in &networks {
            interfaces.push(allocator::allocate_interface(&state.db, network, &machine_id).await?);
        }

        match db::create_machine(&state.db, machine.clone(), interfaces.clone()).await {
            Ok(()) => break interfaces,
            Err(e) if db::is_interface_collision(&e) && attempt + 1 < ALLOCATE_RETRY_LIMIT => {
                attempt += 1;
                tracing::warn!(
                    machine = %request.name,
                    attempt = attempt,
                    "Interface address collision, re-allocating"
                );
            }
            Err(e) => return Err(Error::Persistence(e)),
        }
    };

    tracing::info!(
        machine = %request.name,
        machine_id = %machine_id,
        interfaces = interfaces.len(),
        "Persisted machine record"
    );

    // ========================================================================
    // Disks: overlay, in-image network file, config disk
    // ========================================================================
    let overlay = disk::create_overlay(
        &state.config.pool_dir,
        &machine_id,
        &image.path,
        request.specs.disk_gb,
    )
    .await
    .map_err(Error::Subprocess)?;

    let snippets = render_interfaces(&networks, &interfaces)?;
    disk::inject_network_config(&overlay, &snippets)
        .await
        .map_err(Error::Subprocess)?;

    let pubkeys: Vec<String> = ssh_keys.iter().map(|key| key.pubkey.clone()).collect();
    let user_data = CloudInitConfig::for_machine(&machine_id, &request.user, &pubkeys)
        .and_then(|config| config.to_string())
        .map_err(Error::Internal)?;
    let network_stub = CloudInitNetworkStub::disabled()
        .to_string()
        .map_err(Error::Internal)?;

    let config_disk = disk::build_config_disk(
        &state.config.pool_dir,
        &machine_id,
        &user_data,
        &network_stub,
    )
    .await
    .map_err(Error::Subprocess)?;

    // ========================================================================
    // Define and start the domain
    // ========================================================================
    let xml = DomainTemplate {
        name: machine_id.clone(),
        uuid: machine_id.clone(),
        cpus: request.specs.cpus,
        memory_mb: request.specs.memory_mb,
        config_disk,
        overlay_disk: overlay,
        interfaces: networks
            .iter()
            .zip(&interfaces)
            .map(|(network, iface)| DomainInterface {
                hw_addr: iface.hw_addr.clone(),
                bridged: !network.is_nat(),
                source: if network.is_nat() {
                    network.network_id.clone()
                } else {
                    network.vxlan_bridge_name()
                },
            })
            .collect(),
    }
    .render()
    .map_err(|e| Error::Internal(e.into()))?;

    let conn = state.qemu.connect().map_err(Error::Hypervisor)?;
    libvirt::define_domain(&conn, &xml).map_err(Error::Hypervisor)?;
    libvirt::start_domain(&conn, &machine_id).map_err(Error::Hypervisor)?;

    tracing::info!(machine = %request.name, machine_id = %machine_id, "Machine started");

    state.activity.record(ActivityKind::MachineCreated, &machine_id);

    Ok(CreateMachineResponse { id: machine_id })
}

/// Render the `/etc/network/interfaces.d/10-netcfg` content: one stanza
/// per interface, devices named by position.
fn render_interfaces(
    networks: &[DbNetwork],
    interfaces: &[DbInterface],
) -> Result<String, Error> {
    let snippets = networks
        .iter()
        .zip(interfaces)
        .enumerate()
        .map(|(index, (network, iface))| InterfaceSnippet {
            device: guest_ifname(index),
            address: iface.ipv4.clone(),
            gateway: Some(network.ipv4.gateway.to_string()),
            dns_nameservers: if network.nameservers.is_empty() {
                None
            } else {
                Some(network.nameservers.clone())
            },
        })
        .collect();

    InterfacesTemplate {
        interfaces: snippets,
    }
    .render()
    .map_err(|e| Error::Internal(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::data::IpNetwork;

    fn network(nameservers: &str) -> DbNetwork {
        DbNetwork {
            id: None,
            network_id: "net-1".to_string(),
            name: "default".to_string(),
            ipv4: IpNetwork {
                subnet: "192.168.100.0/24".parse().unwrap(),
                gateway: "192.168.100.1".parse().unwrap(),
            },
            ipv6: None,
            nameservers: nameservers.to_string(),
            search_domains: String::new(),
            bridge_id: 0,
        }
    }

    fn interface(ipv4: &str) -> DbInterface {
        DbInterface {
            id: None,
            machine_id: "m-1".to_string(),
            network_id: "net-1".to_string(),
            ipv4: ipv4.to_string(),
            ipv6: String::new(),
            hw_addr: "52:54:00:00:00:01".to_string(),
        }
    }

    #[test]
    fn snippet_devices_are_positional() {
        let rendered = render_interfaces(
            &[network("192.168.100.1 1.1.1.1"), network("")],
            &[interface("192.168.100.2/24"), interface("192.168.100.3/24")],
        )
        .unwrap();

        assert!(rendered.contains("auto enp1s0"));
        assert!(rendered.contains("address 192.168.100.2/24"));
        assert!(rendered.contains("auto enp2s0"));
        assert!(rendered.contains("address 192.168.100.3/24"));
        assert!(rendered.contains("gateway 192.168.100.1"));
        assert!(rendered.contains("dns-nameservers 192.168.100.1 1.1.1.1"));
    }
}
