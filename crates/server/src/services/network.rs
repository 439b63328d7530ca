//! Network creation and host-side provisioning.
//!
//! A catalog network is realized on the host in one of two modes keyed by
//! `bridge_id`: a hypervisor-managed NAT network, or a host bridge plus
//! VXLAN device managed directly over netlink.

use anyhow::anyhow;
use network::ensure_bridged_network;
use uuid::Uuid;

use shared::Error;
use shared::data::{CreateNetworkRequest, DbNetwork, IpNetwork, Ipv6Network, NetworkView};
use shared::util::ip::parse_subnet;

use crate::daemon::state::AppState;

pub async fn create_network(
    state: &AppState,
    request: CreateNetworkRequest,
) -> Result<NetworkView, Error> {
    if request.name.trim().is_empty() {
        return Err(Error::InvalidArgument("network name is required".into()));
    }

    let subnet = parse_subnet(&request.ipv4.subnet)
        .map_err(|e| Error::InvalidArgument(format!("{e:#}")))?;
    let gateway = request
        .ipv4
        .gateway
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("invalid gateway: {}", request.ipv4.gateway)))?;
    if !subnet.contains(&gateway) {
        return Err(Error::InvalidArgument(format!(
            "gateway {gateway} is outside subnet {subnet}"
        )));
    }

    if db::get_network_by_name(&state.db, &request.name)
        .await
        .map_err(Error::Persistence)?
        .is_some()
    {
        return Err(Error::InvalidArgument(format!(
            "network name already in use: {}",
            request.name
        )));
    }

    let network = DbNetwork {
        id: None,
        network_id: Uuid::new_v4().to_string(),
        name: request.name.clone(),
        ipv4: IpNetwork { subnet, gateway },
        ipv6: request.ipv6.map(|v6| Ipv6Network {
            subnet: v6.subnet,
            gateway: v6.gateway,
        }),
        nameservers: request.nameservers,
        search_domains: request.search_domains,
        bridge_id: request.bridge_id,
    };

    let network = db::create_network(&state.db, network)
        .await
        .map_err(Error::Persistence)?;

    tracing::info!(network = %network.name, network_id = %network.network_id, "Persisted network");

    // Provisioning failure after the commit leaves the row behind; the
    // error names the step and the log carries the partial progress.
    provision_network(state, &network).await?;

    Ok(NetworkView::from(&network))
}

/// Make the host side of `network` exist and be up. Idempotent in both
/// modes; safe to call again on every startup.
pub async fn provision_network(state: &AppState, network: &DbNetwork) -> Result<(), Error> {
    if network.is_nat() {
        let conn = state.qemu.connect().map_err(Error::Hypervisor)?;

        match libvirt::lookup_network(&conn, &network.network_id) {
            Some(existing) => {
                let active =
                    libvirt::is_network_active(&existing).map_err(Error::Hypervisor)?;
                if !active {
                    libvirt::activate_network(&existing).map_err(Error::Hypervisor)?;
                    tracing::info!(network = %network.name, "Activated NAT network");
                }
            }
            None => {
                libvirt::NatNetwork {
                    network_id: network.network_id.clone(),
                    bridge_name: network.nat_bridge_name(),
                }
                .create(&conn)
                .map_err(Error::Hypervisor)?;
            }
        }
    } else {
        ensure_bridged_network(
            &network.vxlan_bridge_name(),
            &network.vxlan_device_name(),
            network.vxlan_vni(),
            network.ipv4.subnet,
            state.config.vxlan_device.as_deref(),
        )
        .await
        .map_err(|e| Error::Internal(anyhow!(e)))?;
    }

    Ok(())
}
