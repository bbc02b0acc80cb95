use super::truncate_sql_bytes;
use super::types::{QueryContext, QueryMonitor, QueryResult};
use std::time::Duration;

/// A `tracing`-based monitor.
///
/// Completed statements are emitted at DEBUG (WARN on failure) and slow
/// statements at WARN, all under the `pgmodel.sql` target.
///
/// Enable via the crate feature: `pgmodel = { features = ["tracing"] }`.
#[derive(Debug, Clone)]
pub struct TracingMonitor {
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingMonitor {
    fn default() -> Self {
        Self {
            max_sql_length: Some(200),
        }
    }
}

impl TracingMonitor {
    /// Create a new monitor with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

impl QueryMonitor for TracingMonitor {
    fn on_query_complete(&self, ctx: &QueryContext, duration: Duration, result: &QueryResult) {
        let sql = self.truncate_sql(&ctx.sql);
        match result {
            QueryResult::Affected(rows) => tracing::debug!(
                target: "pgmodel.sql",
                query_type = ?ctx.query_type,
                param_count = ctx.param_count,
                ?duration,
                rows,
                sql = %sql,
                "statement complete"
            ),
            QueryResult::Error(error) => tracing::warn!(
                target: "pgmodel.sql",
                query_type = ?ctx.query_type,
                param_count = ctx.param_count,
                ?duration,
                error = %error,
                sql = %sql,
                "statement failed"
            ),
        }
    }

    fn on_slow_query(&self, ctx: &QueryContext, duration: Duration) {
        tracing::warn!(
            target: "pgmodel.sql",
            query_type = ?ctx.query_type,
            ?duration,
            sql = %self.truncate_sql(&ctx.sql),
            "slow statement"
        );
    }
}
