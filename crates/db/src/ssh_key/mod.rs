mod create;
mod delete;
mod read;

pub use create::create_ssh_key;
pub use delete::delete_ssh_key;
pub use read::{get_ssh_key, list_ssh_keys};
