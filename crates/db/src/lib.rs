mod activity;
mod connect;
mod image;
mod interface;
mod machine;
mod network;
mod schema;
mod seed;
mod ssh_key;

pub use activity::{create_activity, list_activities};
pub use connect::{Catalog, connect};
pub use image::{create_image, delete_image, get_image, get_image_by_name, list_images};
pub use interface::{
    count_interfaces_by_network, list_interfaces_by_machine, list_interfaces_by_network,
};
pub use machine::{
    create_machine, delete_machine, get_machine, is_interface_collision, list_machines,
    resolve_machine,
};
pub use network::{create_network, delete_network, get_network, get_network_by_name, list_networks};
pub use schema::apply_schema;
pub use seed::seed_defaults;
pub use ssh_key::{create_ssh_key, delete_ssh_key, get_ssh_key, list_ssh_keys};
