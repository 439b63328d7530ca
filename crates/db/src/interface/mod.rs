mod read;

pub use read::{
    count_interfaces_by_network, list_interfaces_by_machine, list_interfaces_by_network,
};
