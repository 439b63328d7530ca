//! Request and response bodies for the machinad JSON API, shared between
//! the server handlers and the CLI client.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::activity::{ActivityKind, DbActivity};
use super::image::{DbImage, OsVariant};
use super::interface::DbInterface;
use super::machine::{MachineState, Specs, TriggerEvent};
use super::network::DbNetwork;
use super::ssh_key::DbSshKey;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMachineRequest {
    pub name: String,
    pub specs: Specs,
    pub image_id: String,
    pub ssh_key_ids: Vec<String>,
    pub network_ids: Vec<String>,
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMachineResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceView {
    pub network_id: String,
    pub ipv4: String,
    pub ipv6: String,
    pub hw_addr: String,
}

impl From<&DbInterface> for InterfaceView {
    fn from(iface: &DbInterface) -> Self {
        Self {
            network_id: iface.network_id.clone(),
            ipv4: iface.ipv4.clone(),
            ipv6: iface.ipv6.clone(),
            hw_addr: iface.hw_addr.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineView {
    pub id: String,
    pub name: String,
    pub status: MachineState,
    pub specs: Specs,
    pub networks: Vec<InterfaceView>,
    pub image_id: String,
    pub ssh_key_ids: Vec<String>,
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMachinesResponse {
    pub machines: Vec<MachineView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineDetailsResponse {
    pub machine: MachineView,
    pub ssh_keys: Vec<SshKeyView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerMachineRequest {
    pub event: TriggerEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerMachineResponse {
    pub status: MachineState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSshKeyRequest {
    pub name: String,
    pub pubkey: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshKeyView {
    pub id: String,
    pub name: String,
    pub pubkey: String,
}

impl From<&DbSshKey> for SshKeyView {
    fn from(key: &DbSshKey) -> Self {
        Self {
            id: key.key_id.clone(),
            name: key.name.clone(),
            pubkey: key.pubkey.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSshKeysResponse {
    pub ssh_keys: Vec<SshKeyView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageView {
    pub id: String,
    pub name: String,
    pub os: OsVariant,
    pub path: String,
}

impl From<&DbImage> for ImageView {
    fn from(image: &DbImage) -> Self {
        Self {
            id: image.image_id.clone(),
            name: image.name.clone(),
            os: image.os,
            path: image.path.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListImagesResponse {
    pub images: Vec<ImageView>,
}

/// Addressing block on a create-network request; parsed and validated by
/// the orchestrator rather than at deserialization time so malformed input
/// surfaces as invalid-argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpNetworkRequest {
    pub subnet: String,
    pub gateway: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNetworkRequest {
    pub name: String,
    pub ipv4: IpNetworkRequest,
    #[serde(default)]
    pub ipv6: Option<IpNetworkRequest>,
    #[serde(default)]
    pub nameservers: String,
    #[serde(default)]
    pub search_domains: String,
    #[serde(default)]
    pub bridge_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkView {
    pub id: String,
    pub name: String,
    pub ipv4_subnet: String,
    pub ipv4_gateway: String,
    pub ipv6_subnet: String,
    pub ipv6_gateway: String,
    pub nameservers: String,
    pub search_domains: String,
    pub bridge_id: u32,
}

impl From<&DbNetwork> for NetworkView {
    fn from(net: &DbNetwork) -> Self {
        Self {
            id: net.network_id.clone(),
            name: net.name.clone(),
            ipv4_subnet: net.ipv4.subnet.to_string(),
            ipv4_gateway: net.ipv4.gateway.to_string(),
            ipv6_subnet: net.ipv6.as_ref().map(|v6| v6.subnet.clone()).unwrap_or_default(),
            ipv6_gateway: net.ipv6.as_ref().map(|v6| v6.gateway.clone()).unwrap_or_default(),
            nameservers: net.nameservers.clone(),
            search_domains: net.search_domains.clone(),
            bridge_id: net.bridge_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNetworksResponse {
    pub networks: Vec<NetworkView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityView {
    pub timestamp: Timestamp,
    pub kind: ActivityKind,
    pub subject: String,
}

impl From<&DbActivity> for ActivityView {
    fn from(activity: &DbActivity) -> Self {
        Self {
            timestamp: activity.timestamp,
            kind: activity.kind,
            subject: activity.subject.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListActivitiesResponse {
    pub activities: Vec<ActivityView>,
}
