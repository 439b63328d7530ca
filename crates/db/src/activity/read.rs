use anyhow::{Context, Result};
use shared::data::DbActivity;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// List all activity records, oldest first.
pub async fn list_activities(db: &Surreal<Any>) -> Result<Vec<DbActivity>> {
    let mut response = db
        .query("SELECT * FROM activity ORDER BY timestamp ASC")
        .await
        .context("Failed to list activities")?;

    let activities: Vec<DbActivity> = response.take(0)?;
    Ok(activities)
}
