//! Startup recovery.
//!
//! Host-side network state (libvirt NAT networks, bridges, VXLAN devices)
//! does not survive a reboot on its own; the catalog is the source of
//! truth. On boot every persisted network is re-ensured, best effort: one
//! network's failure is logged and must not block the rest. Guest domains
//! are left exactly as the hypervisor reports them.

use crate::daemon::state::AppState;
use crate::services::network::provision_network;

pub async fn recover_networks(state: &AppState) {
    let networks = match db::list_networks(&state.db).await {
        Ok(networks) => networks,
        Err(e) => {
            tracing::error!(error = %e, "Startup recovery could not list networks");
            return;
        }
    };

    let total = networks.len();
    let mut recovered = 0;

    for network in &networks {
        match provision_network(state, network).await {
            Ok(()) => {
                recovered += 1;
                tracing::debug!(network = %network.name, "Recovered host network");
            }
            Err(e) => {
                tracing::error!(
                    network = %network.name,
                    network_id = %network.network_id,
                    error = %e,
                    "Failed to recover host network"
                );
            }
        }
    }

    tracing::info!(total = total, recovered = recovered, "Startup network recovery complete");
}
