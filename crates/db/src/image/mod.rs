mod create;
mod delete;
mod read;

pub use create::create_image;
pub use delete::delete_image;
pub use read::{get_image, get_image_by_name, list_images};
