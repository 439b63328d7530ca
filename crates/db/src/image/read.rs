use anyhow::{Context, Result};
use shared::data::DbImage;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Get an image by its business uuid. `Ok(None)` means the image does not
/// exist; `Err` is a store failure.
pub async fn get_image(db: &Surreal<Any>, image_id: &str) -> Result<Option<DbImage>> {
    let mut response = db
        .query("SELECT * FROM ONLY image WHERE image_id = $image_id LIMIT 1")
        .bind(("image_id", image_id.to_string()))
        .await
        .context(format!("Failed to query image: {image_id}"))?;

    let image: Option<DbImage> = response.take(0)?;
    Ok(image)
}

/// Get an image by its unique name.
pub async fn get_image_by_name(db: &Surreal<Any>, name: &str) -> Result<Option<DbImage>> {
    let mut response = db
        .query("SELECT * FROM ONLY image WHERE name = $name LIMIT 1")
        .bind(("name", name.to_string()))
        .await
        .context(format!("Failed to query image by name: {name}"))?;

    let image: Option<DbImage> = response.take(0)?;
    Ok(image)
}

/// List all images. Unordered.
pub async fn list_images(db: &Surreal<Any>) -> Result<Vec<DbImage>> {
    let images: Vec<DbImage> = db.select("image").await.context("Failed to list images")?;

    Ok(images)
}
