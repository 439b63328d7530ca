use anyhow::{Context, Result, anyhow};
use jiff::Timestamp;
use shared::data::{ActivityKind, DbActivity};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Append an activity record stamped with the current time.
pub async fn create_activity(
    db: &Surreal<Any>,
    kind: ActivityKind,
    subject: &str,
) -> Result<DbActivity> {
    let activity: Option<DbActivity> = db
        .create("activity")
        .content(DbActivity {
            id: None,
            timestamp: Timestamp::now(),
            kind,
            subject: subject.to_string(),
        })
        .await
        .context(format!("Failed to record activity: {kind} on {subject}"))?;

    activity.ok_or_else(|| anyhow!("Activity was not recorded: {kind} on {subject}"))
}
