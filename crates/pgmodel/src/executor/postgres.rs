use super::{Callback, Executor};
use crate::error::{OrmError, OrmResult};
use crate::qb::ParamList;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Executes statements on a single `tokio_postgres::Client`.
///
/// Each statement runs as a task on the given tokio runtime.
///
/// # Example
/// ```ignore
/// let (client, connection) = tokio_postgres::connect(url, NoTls).await?;
/// tokio::spawn(connection);
/// let executor = PgExecutor::new(Arc::new(client))?;
/// let items = SqlDataSource::new(executor);
/// ```
#[derive(Clone)]
pub struct PgExecutor {
    client: Arc<tokio_postgres::Client>,
    handle: Handle,
}

impl PgExecutor {
    /// Create an executor on the current tokio runtime.
    ///
    /// Fails when called outside a runtime.
    pub fn new(client: Arc<tokio_postgres::Client>) -> OrmResult<Self> {
        let handle = Handle::try_current().map_err(|e| OrmError::Other(e.to_string()))?;
        Ok(Self::with_handle(client, handle))
    }

    /// Create an executor that spawns onto `handle`.
    pub fn with_handle(client: Arc<tokio_postgres::Client>, handle: Handle) -> Self {
        Self { client, handle }
    }

    pub fn client(&self) -> &tokio_postgres::Client {
        &self.client
    }
}

impl Executor for PgExecutor {
    fn execute(&self, sql: String, params: ParamList, callback: Callback) {
        let client = Arc::clone(&self.client);
        self.handle.spawn(async move {
            let refs = params.as_refs();
            let result = client
                .execute(sql.as_str(), &refs)
                .await
                .map_err(OrmError::from_db_error);
            callback(result);
        });
    }
}

impl std::fmt::Debug for PgExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgExecutor").finish_non_exhaustive()
    }
}
