//! Statement execution.
//!
//! An [`Executor`] runs one compiled statement and reports the outcome through
//! a [`Callback`]. `execute` never blocks the caller; the callback fires at
//! most once, after the statement finishes.

mod postgres;

#[cfg(feature = "pool")]
mod pool;

pub use postgres::PgExecutor;

#[cfg(feature = "pool")]
pub use pool::{PoolExecutor, create_pool, create_pool_with_config};

use crate::error::OrmResult;
use crate::qb::ParamList;
use std::sync::Arc;

/// Completion callback: rows affected, or the execution error.
pub type Callback = Box<dyn FnOnce(OrmResult<u64>) + Send + 'static>;

/// Runs compiled statements.
pub trait Executor: Send + Sync {
    /// Schedule `sql` with `params` and return immediately.
    fn execute(&self, sql: String, params: ParamList, callback: Callback);
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn execute(&self, sql: String, params: ParamList, callback: Callback) {
        (**self).execute(sql, params, callback)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(&self, sql: String, params: ParamList, callback: Callback) {
        (**self).execute(sql, params, callback)
    }
}
