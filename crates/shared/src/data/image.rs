use serde::{Deserialize, Serialize};
use surrealdb_types::RecordId;

/// Operating systems with known cloud images. Machines only reference
/// images, so an unrecognized guest OS is represented, not rejected.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OsVariant {
    #[default]
    Unspecified,
    DebianBuster,
    DebianBullseye,
    DebianBookworm,
}

/// A read-only base image on the host. Per-machine disks are qcow2 overlays
/// backed by `path`; the file itself is never written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub image_id: String,
    pub name: String,
    pub os: OsVariant,
    pub path: String,
}
