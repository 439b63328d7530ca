use serde::{Deserialize, Serialize};

use crate::konst::{MACHINAD_LISTEN, MACHINA_DB_ENDPOINT, MACHINA_POOL_DIR, QEMU_URI};

/// Process-wide configuration for the daemon. Every field has a default
/// sensible for a single Linux host; the CLI layer fills these from flags
/// and environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog endpoint, e.g. `surrealkv:///var/lib/machina/catalog` or
    /// `mem://` for an ephemeral store.
    pub db_endpoint: String,
    /// Hypervisor connection URI.
    pub libvirt_uri: String,
    /// Base directory for per-machine disks and config images.
    pub pool_dir: String,
    /// Listen address for the HTTP API.
    pub listen: String,
    /// Underlay device carrying VXLAN traffic for bridged networks.
    pub vxlan_device: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_endpoint: MACHINA_DB_ENDPOINT.to_owned(),
            libvirt_uri: QEMU_URI.to_owned(),
            pool_dir: MACHINA_POOL_DIR.to_owned(),
            listen: MACHINAD_LISTEN.to_owned(),
            vxlan_device: None,
        }
    }
}
