pub mod activities;
pub mod images;
pub mod machines;
pub mod networks;
pub mod ssh_keys;
