use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use surrealdb_types::RecordId;

/// Lifecycle events recorded after the causing operation succeeds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ActivityKind {
    MachineCreated,
    MachineDeleted,
    MachinePoweron,
    MachinePoweroff,
    MachineReboot,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Append-only activity record. `subject` is the machine uuid the event
/// refers to, kept as plain text so the record outlives the machine row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbActivity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub timestamp: Timestamp,
    pub kind: ActivityKind,
    pub subject: String,
}
