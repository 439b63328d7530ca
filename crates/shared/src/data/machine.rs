use serde::{Deserialize, Serialize};
use surrealdb_types::RecordId;

/// Resource sizing for a machine. Memory is megabytes, disk is gibibytes;
/// the wire and storage names stay the bare `memory`/`disk` of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specs {
    pub cpus: i64,
    #[serde(rename = "memory")]
    pub memory_mb: i64,
    #[serde(rename = "disk")]
    pub disk_gb: i64,
}

/// Catalog record for a guest. Interfaces live in their own table keyed
/// back to the machine; everything else is embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbMachine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub machine_id: String,
    pub name: String,
    pub user: String,
    pub image_id: String,
    pub ssh_key_ids: Vec<String>,
    pub specs: Specs,
}

/// Guest state as observed from the hypervisor. Never stored; derived on
/// demand from the domain state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MachineState {
    Created,
    Stopped,
    Running,
    Crashed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Lifecycle transitions a caller may request on a machine.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TriggerEvent {
    Poweron,
    Poweroff,
    Reboot,
    #[default]
    #[serde(other)]
    Unknown,
}
