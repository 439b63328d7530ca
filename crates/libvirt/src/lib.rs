mod domain;
mod network;
mod qemu;

pub use domain::{
    define_domain, domain_state, lookup_domain, reboot_domain, start_domain, stop_domain,
    undefine_domain,
};
pub use network::{NatNetwork, activate_network, is_network_active, lookup_network};
pub use qemu::{Qemu, QemuConnection};
