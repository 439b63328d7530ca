mod linux;

pub use linux::{ProvisionError, ensure_bridged_network, link_exists};
