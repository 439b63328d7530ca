use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Shared handle to the catalog. The engine is selected by the endpoint
/// string: `surrealkv://<path>` for the on-disk store, `mem://` for an
/// ephemeral one (tests, dry runs).
pub type Catalog = Arc<Surreal<Any>>;

pub async fn connect(
    endpoint: &str,
    namespace: &str,
    database: &str,
) -> surrealdb::Result<Catalog> {
    let db = surrealdb::engine::any::connect(endpoint).await?;
    db.use_ns(namespace).use_db(database).await?;
    Ok(Arc::new(db))
}
