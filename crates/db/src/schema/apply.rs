//! Schema application.
//!
//! Applies all table definitions to the catalog in dependency order. Every
//! definition is idempotent, so this runs unconditionally on startup.

use anyhow::{Context, Result};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use super::activity::generate_activity_schema;
use super::image::generate_image_schema;
use super::interface::generate_interface_schema;
use super::machine::generate_machine_schema;
use super::network::generate_network_schema;
use super::ssh_key::generate_ssh_key_schema;

async fn apply_schema_section(db: &Surreal<Any>, section_name: &str, schema: &str) -> Result<()> {
    tracing::debug!(table = %section_name, "Creating catalog table");

    db.query(schema)
        .await
        .context(format!("Failed to apply schema: {section_name}"))?;

    Ok(())
}

/// Apply all catalog schemas.
///
/// Referenced-by tables come last so that machine rows can name images,
/// keys and networks that already have their unique indexes in place:
/// ssh_key, image, network, then machine, interface, activity.
pub async fn apply_schema(db: &Surreal<Any>) -> Result<()> {
    apply_schema_section(db, "ssh_key", &generate_ssh_key_schema()).await?;
    apply_schema_section(db, "image", &generate_image_schema()).await?;
    apply_schema_section(db, "network", &generate_network_schema()).await?;
    apply_schema_section(db, "machine", &generate_machine_schema()).await?;
    apply_schema_section(db, "interface", &generate_interface_schema()).await?;
    apply_schema_section(db, "activity", &generate_activity_schema()).await?;

    Ok(())
}
