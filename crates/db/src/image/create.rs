use anyhow::{Context, Result, anyhow};
use shared::data::{DbImage, OsVariant};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Create a base image record pointing at a qcow2 file on the host.
pub async fn create_image(
    db: &Surreal<Any>,
    image_id: &str,
    name: &str,
    os: OsVariant,
    path: &str,
) -> Result<DbImage> {
    let image: Option<DbImage> = db
        .create("image")
        .content(DbImage {
            id: None,
            image_id: image_id.to_string(),
            name: name.to_string(),
            os,
            path: path.to_string(),
        })
        .await
        .context(format!("Failed to create image: {name}"))?;

    image.ok_or_else(|| anyhow!("Image was not created: {name}"))
}
