use std::sync::Arc;

use anyhow::{Context, Result};
use libvirt::Qemu;
use shared::data::Config;
use shared::konst::{MACHINA_DB_NAME, MACHINA_DB_NAMESPACE};

use crate::services::activity::ActivityRecorder;

/// Application state shared across request handlers: the catalog handle,
/// the libvirt connector, the process configuration and the background
/// activity recorder.
#[derive(Clone)]
pub struct AppState {
    /// Catalog connection
    pub db: db::Catalog,
    /// libvirt/QEMU client
    pub qemu: Arc<Qemu>,
    /// Process configuration
    pub config: Arc<Config>,
    /// Detached activity writer
    pub activity: ActivityRecorder,
}

impl AppState {
    /// Create a new AppState: open the catalog, apply schema and seeds,
    /// and prepare the libvirt connector.
    pub async fn new(config: Config) -> Result<Self> {
        let db = db::connect(&config.db_endpoint, MACHINA_DB_NAMESPACE, MACHINA_DB_NAME)
            .await
            .context("Failed to open catalog")?;
        tracing::info!(endpoint = %config.db_endpoint, "Opened catalog");

        db::apply_schema(&db)
            .await
            .context("Failed to apply catalog schema")?;
        tracing::debug!("Catalog schema applied");

        match db::seed_defaults(&db).await {
            Ok(count) => {
                if count > 0 {
                    tracing::info!(count = count, "Seeded default records");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to seed default records");
            }
        }

        let qemu = Qemu::new(&config.libvirt_uri);
        tracing::info!(uri = %config.libvirt_uri, "Initialized libvirt/QEMU client");

        let activity = ActivityRecorder::new(db.clone());

        Ok(Self {
            db,
            qemu: Arc::new(qemu),
            config: Arc::new(config),
            activity,
        })
    }
}
