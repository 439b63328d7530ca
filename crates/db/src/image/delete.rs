use anyhow::{Context, Result};
use shared::data::DbImage;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Delete an image record by its business uuid. Returns whether a record
/// was removed. Machines referencing the image must be gone first; the
/// caller checks.
pub async fn delete_image(db: &Surreal<Any>, image_id: &str) -> Result<bool> {
    let deleted: Vec<DbImage> = db
        .query("DELETE image WHERE image_id = $image_id RETURN BEFORE")
        .bind(("image_id", image_id.to_string()))
        .await
        .context(format!("Failed to delete image: {image_id}"))?
        .take(0)?;

    Ok(!deleted.is_empty())
}
