mod create;
mod delete;
mod read;

pub use create::{create_machine, is_interface_collision};
pub use delete::delete_machine;
pub use read::{get_machine, list_machines, resolve_machine};
