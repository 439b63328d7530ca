//! Per-interface address allocation.
//!
//! The allocator reads the interface set of a network without a lock and
//! picks the first free host address plus a fresh MAC. Collisions between
//! concurrent requests are caught later by the `(network_id, ipv4)` unique
//! index when the create-machine transaction commits; the caller then
//! retries the allocate-and-persist cycle.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use anyhow::Context;

use shared::Error;
use shared::data::{DbInterface, DbNetwork};
use shared::konst::KVM_OUI;
use shared::util::ip::{host_of, next_free_host};
use shared::util::mac::random_mac;

/// Allocate one interface for `machine_id` on `network`. Nothing is
/// persisted here.
pub async fn allocate_interface(
    db: &db::Catalog,
    network: &DbNetwork,
    machine_id: &str,
) -> Result<DbInterface, Error> {
    let existing = db::list_interfaces_by_network(db, &network.network_id)
        .await
        .map_err(Error::Persistence)?;

    let mut taken: HashSet<Ipv4Addr> = HashSet::new();
    for iface in &existing {
        let addr = host_of(&iface.ipv4)
            .context("Stored interface address is not valid CIDR")
            .map_err(Error::Internal)?;
        taken.insert(addr);
    }

    let host = next_free_host(&network.ipv4.subnet, network.ipv4.gateway, &taken)
        .ok_or_else(|| Error::SubnetExhausted(network.name.clone()))?;

    Ok(DbInterface {
        id: None,
        machine_id: machine_id.to_string(),
        network_id: network.network_id.clone(),
        ipv4: format!("{host}/{}", network.ipv4.subnet.prefix_len()),
        ipv6: String::new(),
        hw_addr: random_mac(KVM_OUI),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::data::IpNetwork;

    async fn setup_db() -> db::Catalog {
        let catalog = db::connect("mem://", "machina", "allocator-test")
            .await
            .unwrap();
        db::apply_schema(&catalog).await.unwrap();
        catalog
    }

    fn network(subnet: &str, gateway: &str) -> DbNetwork {
        DbNetwork {
            id: None,
            network_id: "net-under-test".to_string(),
            name: "default".to_string(),
            ipv4: IpNetwork {
                subnet: subnet.parse().unwrap(),
                gateway: gateway.parse().unwrap(),
            },
            ipv6: None,
            nameservers: String::new(),
            search_domains: String::new(),
            bridge_id: 0,
        }
    }

    fn machine(machine_id: &str, name: &str) -> shared::data::DbMachine {
        shared::data::DbMachine {
            id: None,
            machine_id: machine_id.to_string(),
            name: name.to_string(),
            user: "ken".to_string(),
            image_id: "img".to_string(),
            ssh_key_ids: vec!["key".to_string()],
            specs: shared::data::Specs {
                cpus: 1,
                memory_mb: 512,
                disk_gb: 5,
            },
        }
    }

    #[tokio::test]
    async fn sequential_allocations_walk_the_subnet() {
        let catalog = setup_db().await;
        let net = network("192.168.100.0/24", "192.168.100.1");

        let first = allocate_interface(&catalog, &net, "m-1").await.unwrap();
        assert_eq!(first.ipv4, "192.168.100.2/24");
        assert!(first.hw_addr.starts_with("52:54:00:"));

        // Persist the first machine so the second allocation sees it.
        db::create_machine(&catalog, machine("m-1", "m1"), vec![first])
            .await
            .unwrap();

        let second = allocate_interface(&catalog, &net, "m-2").await.unwrap();
        assert_eq!(second.ipv4, "192.168.100.3/24");
    }

    #[tokio::test]
    async fn exhausted_subnet_reports_the_network_name() {
        let catalog = setup_db().await;
        let net = network("10.1.2.0/30", "10.1.2.1");

        let only = allocate_interface(&catalog, &net, "m-1").await.unwrap();
        assert_eq!(only.ipv4, "10.1.2.2/30");
        db::create_machine(&catalog, machine("m-1", "m1"), vec![only])
            .await
            .unwrap();

        let err = allocate_interface(&catalog, &net, "m-2").await.unwrap_err();
        assert!(matches!(err, Error::SubnetExhausted(ref name) if name == "default"));
    }
}
