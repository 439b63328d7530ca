use clap::Parser;

use shared::data::Config;
use shared::konst::{MACHINAD_LISTEN, MACHINA_DB_ENDPOINT, MACHINA_POOL_DIR, QEMU_URI};

#[derive(Parser)]
#[command(name = "machinad")]
#[command(bin_name = "machinad")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Virtual machine control plane daemon", long_about = None)]
pub struct Cli {
    /// Catalog endpoint (surrealkv://<path> or mem://)
    #[arg(long, env = "MACHINA_DB", default_value = MACHINA_DB_ENDPOINT)]
    pub db: String,

    /// Address to listen on
    #[arg(long, env = "MACHINA_LISTEN", default_value = MACHINAD_LISTEN)]
    pub address: String,

    /// Libvirt instance
    #[arg(long, env = "MACHINA_LIBVIRT", default_value = QEMU_URI)]
    pub libvirt: String,

    /// Directory holding per-machine disks and config images
    #[arg(long, env = "MACHINA_POOL", default_value = MACHINA_POOL_DIR)]
    pub pool: String,

    /// Host device carrying VXLAN traffic for bridged networks
    #[arg(long, env = "MACHINA_VXLAN_DEVICE")]
    pub vxlan_device: Option<String>,
}

impl Cli {
    pub fn into_config(self) -> Config {
        Config {
            db_endpoint: self.db,
            libvirt_uri: self.libvirt,
            pool_dir: self.pool,
            listen: self.address,
            vxlan_device: self.vxlan_device,
        }
    }
}
