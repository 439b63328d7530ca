use tokio_util::task::TaskTracker;

use shared::data::ActivityKind;

/// Fire-and-forget activity log writer.
///
/// Lifecycle events are recorded after the causing operation succeeds, off
/// the request path. Writes may outlive the request but not the process:
/// the tracker is drained on graceful shutdown.
#[derive(Clone)]
pub struct ActivityRecorder {
    db: db::Catalog,
    tracker: TaskTracker,
}

impl ActivityRecorder {
    pub fn new(db: db::Catalog) -> Self {
        Self {
            db,
            tracker: TaskTracker::new(),
        }
    }

    /// Queue one activity record. Failures are logged, never surfaced to
    /// the caller whose operation already succeeded.
    pub fn record(&self, kind: ActivityKind, subject: &str) {
        let db = self.db.clone();
        let subject = subject.to_string();

        self.tracker.spawn(async move {
            if let Err(e) = db::create_activity(&db, kind, &subject).await {
                tracing::error!(kind = %kind, subject = %subject, error = %e, "Failed to record activity");
            }
        });
    }

    /// Wait for queued writes to land. Called once during shutdown.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}
