mod create;
mod delete;
mod read;

pub use create::create_network;
pub use delete::delete_network;
pub use read::{get_network, get_network_by_name, list_networks};
