use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use surrealdb_types::RecordId;

use crate::konst::{NAT_BRIDGE_PREFIX, VXLAN_BRIDGE_PREFIX, VXLAN_DEVICE_PREFIX};

/// IPv4 addressing for a network. The gateway must live inside the subnet;
/// the catalog enforces this at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpNetwork {
    pub subnet: Ipv4Net,
    pub gateway: Ipv4Addr,
}

/// Optional IPv6 addressing, carried as opaque text and handed through to
/// guest network configuration unparsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ipv6Network {
    pub subnet: String,
    pub gateway: String,
}

/// A virtual network guests attach to. `bridge_id` selects the host-side
/// realization: zero means a libvirt NAT network, non-zero means a host
/// bridge stitched to a VXLAN segment with that id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbNetwork {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub network_id: String,
    pub name: String,
    pub ipv4: IpNetwork,
    pub ipv6: Option<Ipv6Network>,
    pub nameservers: String,
    pub search_domains: String,
    pub bridge_id: u32,
}

impl DbNetwork {
    pub fn is_nat(&self) -> bool {
        self.bridge_id == 0
    }

    /// Host bridge name used by libvirt in NAT mode.
    pub fn nat_bridge_name(&self) -> String {
        format!("{NAT_BRIDGE_PREFIX}-{}", self.name)
    }

    /// Host bridge name in VXLAN-bridged mode.
    pub fn vxlan_bridge_name(&self) -> String {
        format!("{VXLAN_BRIDGE_PREFIX}-{}", self.bridge_id)
    }

    /// VXLAN device name in VXLAN-bridged mode.
    pub fn vxlan_device_name(&self) -> String {
        format!("{VXLAN_DEVICE_PREFIX}-{}", self.bridge_id)
    }

    /// VXLAN network identifier; the wire format carries 24 bits.
    pub fn vxlan_vni(&self) -> u32 {
        self.bridge_id % (1 << 24)
    }

    /// Whitespace-separated nameservers as a list.
    pub fn nameserver_list(&self) -> Vec<String> {
        self.nameservers
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(bridge_id: u32) -> DbNetwork {
        DbNetwork {
            id: None,
            network_id: "eb7a6e41-30cb-4d26-a03f-4c0e1e6ad12a".to_string(),
            name: "default".to_string(),
            ipv4: IpNetwork {
                subnet: "192.168.100.0/24".parse().unwrap(),
                gateway: "192.168.100.1".parse().unwrap(),
            },
            ipv6: None,
            nameservers: "192.168.100.1 1.1.1.1".to_string(),
            search_domains: String::new(),
            bridge_id,
        }
    }

    #[test]
    fn zero_bridge_id_selects_nat_mode() {
        assert!(network(0).is_nat());
        assert!(!network(42).is_nat());
    }

    #[test]
    fn host_device_names_follow_the_bridge_id() {
        let net = network(42);
        assert_eq!(net.vxlan_bridge_name(), "vxbr-42");
        assert_eq!(net.vxlan_device_name(), "vxlan-42");
        assert_eq!(network(0).nat_bridge_name(), "natbr-default");
    }

    #[test]
    fn vni_wraps_to_24_bits() {
        assert_eq!(network(42).vxlan_vni(), 42);
        assert_eq!(network(1 << 24).vxlan_vni(), 0);
        assert_eq!(network((1 << 24) + 7).vxlan_vni(), 7);
    }

    #[test]
    fn nameservers_split_on_whitespace() {
        assert_eq!(network(0).nameserver_list(), vec!["192.168.100.1", "1.1.1.1"]);
    }
}
