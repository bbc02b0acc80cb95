//! Execution monitoring for compiled statements.
//!
//! [`InstrumentedExecutor`] wraps any [`Executor`](crate::executor::Executor),
//! times each statement from scheduling to callback, and reports to a
//! [`QueryMonitor`]. A [`QueryHook`] can veto statements before they run.
//!
//! # Example
//!
//! ```rust,ignore
//! use pgmodel::monitor::{InstrumentedExecutor, MonitorConfig, StatsMonitor};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let stats = Arc::new(StatsMonitor::new());
//! let executor = InstrumentedExecutor::new(PgExecutor::new(client)?)
//!     .with_config(
//!         MonitorConfig::new()
//!             .with_slow_query_threshold(Duration::from_millis(250))
//!             .enable_monitoring(),
//!     )
//!     .with_monitor_arc(stats.clone());
//! ```

mod config;
mod instrumented;
mod monitors;
mod types;

#[cfg(feature = "tracing")]
mod tracing_monitor;

#[cfg(test)]
mod tests;

pub use config::MonitorConfig;
pub use instrumented::InstrumentedExecutor;
pub use monitors::{NoopMonitor, QueryStats, StatsMonitor};
pub use types::{HookAction, QueryContext, QueryHook, QueryMonitor, QueryResult, QueryType};

#[cfg(feature = "tracing")]
pub use tracing_monitor::TracingMonitor;

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
