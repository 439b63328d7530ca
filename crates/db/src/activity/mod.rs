mod create;
mod read;

pub use create::create_activity;
pub use read::list_activities;
