pub const MACHINA_BASE_DIR: &str = "/var/lib/machina";
pub const MACHINA_POOL_DIR: &str = "/var/lib/machina/images";
pub const MACHINA_DB_ENDPOINT: &str = "surrealkv:///var/lib/machina/catalog";
pub const MACHINA_DB_NAMESPACE: &str = "machina";
pub const MACHINA_DB_NAME: &str = "machina";
pub const MACHINAD_LISTEN: &str = "127.0.0.1:9876";

pub const QEMU_URI: &str = "qemu:///system";

pub const KVM_OUI: &str = "52:54:00";
pub const MTU_STD: u32 = 1500;

pub const NAT_BRIDGE_PREFIX: &str = "natbr";
pub const VXLAN_BRIDGE_PREFIX: &str = "vxbr";
pub const VXLAN_DEVICE_PREFIX: &str = "vxlan";
pub const VXLAN_GROUP: &str = "239.1.1.1";
pub const VXLAN_PORT: u16 = 4789;

pub const CLOUD_INIT_USER_DATA: &str = "user-data";
pub const CLOUD_INIT_NETWORK_CONFIG: &str = "network-config";
pub const NETWORK_SNIPPET_FILE: &str = "10-netcfg";
pub const NETWORK_SNIPPET_GUEST_DIR: &str = "/etc/network";

pub const GUEST_USER_PATTERN: &str = "^[a-z][-a-z0-9]*$";
pub const GUEST_FALLBACK_PASSWORD: &str = "debian:debian";

// Bounded retry for the allocate-then-persist cycle when two requests race
// for the same address on one network.
pub const ALLOCATE_RETRY_LIMIT: usize = 8;

// Seed records created on first start when absent.
pub const SEED_IMAGE_ID: &str = "6274bb3f-97a4-4fbc-9e40-1c39e0a8c528";
pub const SEED_IMAGE_NAME: &str = "debian-bullseye";
pub const SEED_IMAGE_PATH: &str = "/var/lib/machina/images/debian-bullseye.qcow2";
pub const SEED_SSH_KEY_ID: &str = "f5e8f193-53f4-4837-9e0e-9b22aa4f8a82";
pub const SEED_SSH_KEY_NAME: &str = "default";
pub const SEED_NETWORK_ID: &str = "eb7a6e41-30cb-4d26-a03f-4c0e1e6ad12a";
pub const SEED_NETWORK_NAME: &str = "default";
pub const SEED_NETWORK_SUBNET: &str = "192.168.100.0/24";
pub const SEED_NETWORK_GATEWAY: &str = "192.168.100.1";
pub const SEED_NETWORK_NAMESERVERS: &str = "192.168.100.1 1.1.1.1";
