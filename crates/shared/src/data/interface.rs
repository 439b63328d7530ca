use serde::{Deserialize, Serialize};
use surrealdb_types::RecordId;

/// A guest NIC attached to one network. `ipv4` is CIDR text
/// (`a.b.c.d/prefix`); the `(network_id, ipv4)` pair is unique per catalog.
/// Interfaces are created with their machine and cascade-deleted with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbInterface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub machine_id: String,
    pub network_id: String,
    pub ipv4: String,
    pub ipv6: String,
    pub hw_addr: String,
}
