mod activity;
mod apply;
mod image;
mod interface;
mod machine;
mod network;
mod ssh_key;

pub use apply::apply_schema;
pub(crate) use interface::INTERFACE_UNIQUE_INDEX;
