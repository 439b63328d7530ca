mod cloud_init;
mod domain;
mod interfaces;

pub use cloud_init::{Chpasswd, CloudInitConfig, CloudInitNetworkStub, CloudInitUser};
pub use domain::{DomainInterface, DomainTemplate};
pub use interfaces::{InterfaceSnippet, InterfacesTemplate};
