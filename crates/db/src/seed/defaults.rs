//! Idempotent seed records.
//!
//! A fresh catalog gets a default base image, a default ssh key and a
//! default NAT network so the first create-machine call has something to
//! reference. Records are matched by their fixed uuids and created only
//! when absent; nothing is ever overwritten.

use anyhow::{Context, Result};
use shared::data::{DbNetwork, IpNetwork, OsVariant};
use shared::konst::{
    SEED_IMAGE_ID, SEED_IMAGE_NAME, SEED_IMAGE_PATH, SEED_NETWORK_GATEWAY, SEED_NETWORK_ID,
    SEED_NETWORK_NAME, SEED_NETWORK_NAMESERVERS, SEED_NETWORK_SUBNET, SEED_SSH_KEY_ID,
    SEED_SSH_KEY_NAME,
};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use crate::image::{create_image, get_image};
use crate::network::{create_network, get_network};
use crate::ssh_key::{create_ssh_key, get_ssh_key};

const SEED_SSH_KEY_PUBKEY: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGp4yaCBmXHDLRiDGZx0M9yIlbaGM7wbWXHdEuIEmRF3 machina@host";

/// Insert the default records when absent. Returns how many records were
/// created on this run.
pub async fn seed_defaults(db: &Surreal<Any>) -> Result<usize> {
    let mut created = 0;

    if get_image(db, SEED_IMAGE_ID).await?.is_none() {
        create_image(
            db,
            SEED_IMAGE_ID,
            SEED_IMAGE_NAME,
            OsVariant::DebianBullseye,
            SEED_IMAGE_PATH,
        )
        .await
        .context("Failed to seed default image")?;
        tracing::debug!(image = SEED_IMAGE_NAME, "Seeded default image");
        created += 1;
    }

    if get_ssh_key(db, SEED_SSH_KEY_ID).await?.is_none() {
        create_ssh_key(db, SEED_SSH_KEY_ID, SEED_SSH_KEY_NAME, SEED_SSH_KEY_PUBKEY)
            .await
            .context("Failed to seed default ssh key")?;
        tracing::debug!(key = SEED_SSH_KEY_NAME, "Seeded default ssh key");
        created += 1;
    }

    if get_network(db, SEED_NETWORK_ID).await?.is_none() {
        let network = DbNetwork {
            id: None,
            network_id: SEED_NETWORK_ID.to_string(),
            name: SEED_NETWORK_NAME.to_string(),
            ipv4: IpNetwork {
                subnet: SEED_NETWORK_SUBNET
                    .parse()
                    .context("Seed network subnet is not valid CIDR")?,
                gateway: SEED_NETWORK_GATEWAY
                    .parse()
                    .context("Seed network gateway is not a valid address")?,
            },
            ipv6: None,
            nameservers: SEED_NETWORK_NAMESERVERS.to_string(),
            search_domains: String::new(),
            bridge_id: 0,
        };
        create_network(db, network)
            .await
            .context("Failed to seed default network")?;
        tracing::debug!(network = SEED_NETWORK_NAME, "Seeded default network");
        created += 1;
    }

    Ok(created)
}
