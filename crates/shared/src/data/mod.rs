mod activity;
mod config;
mod image;
mod interface;
mod machine;
mod network;
mod rpc;
mod ssh_key;

pub use activity::{ActivityKind, DbActivity};
pub use config::Config;
pub use image::{DbImage, OsVariant};
pub use interface::DbInterface;
pub use machine::{DbMachine, MachineState, Specs, TriggerEvent};
pub use network::{DbNetwork, IpNetwork, Ipv6Network};
pub use rpc::{
    ActivityView, CreateMachineRequest, CreateMachineResponse, CreateNetworkRequest,
    CreateSshKeyRequest, ImageView, InterfaceView, IpNetworkRequest, ListActivitiesResponse,
    ListImagesResponse, ListMachinesResponse, ListNetworksResponse, ListSshKeysResponse,
    MachineDetailsResponse, MachineView, NetworkView, SshKeyView, TriggerMachineRequest,
    TriggerMachineResponse,
};
pub use ssh_key::DbSshKey;

pub use surrealdb_types::RecordId;
