//! Host link-layer provisioning for VXLAN-bridged networks.
//!
//! A bridged catalog network maps to two host devices: a Linux bridge the
//! guests attach to, and a VXLAN device enslaved to that bridge carrying
//! the segment between hosts over multicast.

use std::net::{IpAddr, Ipv4Addr};

use anyhow::{Context, Result, anyhow};
use futures::TryStreamExt;
use ipnet::Ipv4Net;
use rtnetlink::packet_route::link::{
    InfoData, InfoKind, InfoVxlan, LinkAttribute, LinkFlags, LinkInfo, LinkMessage,
};
use rtnetlink::{Handle, LinkBridge, new_connection};
use thiserror::Error;

use shared::konst::{MTU_STD, VXLAN_GROUP, VXLAN_PORT};

/// Provisioning failures, keyed by the step that failed so callers can log
/// what was and was not set up. The netlink error is preserved underneath.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("bridge-create {name}: {source:#}")]
    BridgeCreate {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("addr-add {name}: {source:#}")]
    AddrAdd {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("vxlan-create {name}: {source:#}")]
    VxlanCreate {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("link-up {name}: {source:#}")]
    LinkUp {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Helper to set up netlink connection
async fn setup_netlink() -> Result<Handle> {
    let (connection, handle, _) = new_connection().context("Error creating netlink connection")?;
    tokio::spawn(connection);
    Ok(handle)
}

/// Helper to find a link index by exact name
async fn find_link(handle: &Handle, name: &str) -> Option<u32> {
    let mut links = handle.link().get().match_name(name.to_string()).execute();

    match links.try_next().await {
        Ok(Some(msg)) => Some(msg.header.index),
        // A name miss surfaces as an error from the kernel, not an empty
        // stream, so a lookup failure here means "no such link".
        Ok(None) | Err(_) => None,
    }
}

/// Helper to get a link index
async fn get_link_index(handle: &Handle, name: &str) -> Result<u32> {
    find_link(handle, name)
        .await
        .ok_or_else(|| anyhow!("link {} not found", name))
}

/// Helper to set a link to up state
async fn set_link_up(handle: &Handle, name: &str, index: u32) -> Result<()> {
    let mut msg = LinkMessage::default();
    msg.header.index = index;
    msg.header.flags = LinkFlags::Up;
    msg.header.change_mask = LinkFlags::Up;

    handle
        .link()
        .set(msg)
        .execute()
        .await
        .context(format!("Error setting link state to up: {name}"))?;
    Ok(())
}

/// Whether a link with this exact name exists on the host.
pub async fn link_exists(name: &str) -> Result<bool> {
    let handle = setup_netlink().await?;
    Ok(find_link(&handle, name).await.is_some())
}

async fn create_bridge(handle: &Handle, name: &str) -> Result<()> {
    let mut msg = LinkBridge::new(name).build();
    msg.attributes.push(LinkAttribute::Mtu(MTU_STD));

    handle
        .link()
        .add(msg)
        .execute()
        .await
        .context(format!("Error creating bridge: {name}"))?;
    Ok(())
}

async fn add_subnet_address(handle: &Handle, index: u32, subnet: Ipv4Net) -> Result<()> {
    handle
        .address()
        .add(index, IpAddr::V4(subnet.network()), subnet.prefix_len())
        .execute()
        .await
        .context(format!("Error assigning subnet: {subnet}"))?;
    Ok(())
}

async fn create_vxlan(
    handle: &Handle,
    name: &str,
    vni: u32,
    bridge_index: u32,
    underlay_index: Option<u32>,
) -> Result<()> {
    let group: Ipv4Addr = VXLAN_GROUP.parse().context("Invalid VXLAN group address")?;

    let mut info = vec![
        InfoVxlan::Id(vni),
        InfoVxlan::Group(group),
        InfoVxlan::Port(VXLAN_PORT),
    ];
    if let Some(dev) = underlay_index {
        info.push(InfoVxlan::Link(dev));
    }

    let mut msg = LinkMessage::default();
    msg.attributes.push(LinkAttribute::IfName(name.to_string()));
    msg.attributes.push(LinkAttribute::Controller(bridge_index));
    msg.attributes.push(LinkAttribute::LinkInfo(vec![
        LinkInfo::Kind(InfoKind::Vxlan),
        LinkInfo::Data(InfoData::Vxlan(info)),
    ]));

    handle
        .link()
        .add(msg)
        .execute()
        .await
        .context(format!("Error creating vxlan device: {name}"))?;
    Ok(())
}

/// Make the host side of a VXLAN-bridged network exist and be up.
///
/// Idempotent: an existing bridge with the target name means a previous
/// provisioning run finished and the whole call is a no-op. `underlay` is
/// the optional device carrying the VXLAN traffic.
pub async fn ensure_bridged_network(
    bridge_name: &str,
    vxlan_name: &str,
    vni: u32,
    subnet: Ipv4Net,
    underlay: Option<&str>,
) -> Result<(), ProvisionError> {
    let handle = setup_netlink().await.map_err(|e| ProvisionError::BridgeCreate {
        name: bridge_name.to_string(),
        source: e,
    })?;

    if find_link(&handle, bridge_name).await.is_some() {
        tracing::debug!(bridge = %bridge_name, "Bridge already provisioned");
        return Ok(());
    }

    create_bridge(&handle, bridge_name)
        .await
        .map_err(|e| ProvisionError::BridgeCreate {
            name: bridge_name.to_string(),
            source: e,
        })?;

    let bridge_index =
        get_link_index(&handle, bridge_name)
            .await
            .map_err(|e| ProvisionError::BridgeCreate {
                name: bridge_name.to_string(),
                source: e,
            })?;

    add_subnet_address(&handle, bridge_index, subnet)
        .await
        .map_err(|e| ProvisionError::AddrAdd {
            name: bridge_name.to_string(),
            source: e,
        })?;

    let underlay_index = match underlay {
        Some(dev) => Some(get_link_index(&handle, dev).await.map_err(|e| {
            ProvisionError::VxlanCreate {
                name: vxlan_name.to_string(),
                source: anyhow!("underlay {dev}: {e:#}"),
            }
        })?),
        None => None,
    };

    create_vxlan(&handle, vxlan_name, vni, bridge_index, underlay_index)
        .await
        .map_err(|e| ProvisionError::VxlanCreate {
            name: vxlan_name.to_string(),
            source: e,
        })?;

    let vxlan_index =
        get_link_index(&handle, vxlan_name)
            .await
            .map_err(|e| ProvisionError::VxlanCreate {
                name: vxlan_name.to_string(),
                source: e,
            })?;
    set_link_up(&handle, vxlan_name, vxlan_index)
        .await
        .map_err(|e| ProvisionError::LinkUp {
            name: vxlan_name.to_string(),
            source: e,
        })?;

    set_link_up(&handle, bridge_name, bridge_index)
        .await
        .map_err(|e| ProvisionError::LinkUp {
            name: bridge_name.to_string(),
            source: e,
        })?;

    tracing::info!(
        bridge = %bridge_name,
        vxlan = %vxlan_name,
        vni = vni,
        subnet = %subnet,
        "Provisioned bridged network"
    );

    Ok(())
}
