use super::config::MonitorConfig;
use super::monitors::NoopMonitor;
use super::types::{HookAction, QueryContext, QueryHook, QueryMonitor, QueryResult};
use crate::error::{OrmError, OrmResult};
use crate::executor::{Callback, Executor};
use crate::qb::ParamList;
use std::sync::Arc;
use std::time::Instant;

/// An executor wrapper that reports every statement to a monitor.
///
/// Timing runs from `execute` until the inner executor fires the callback.
/// Monitoring must be explicitly enabled via `MonitorConfig::enable_monitoring()`;
/// hooks run either way.
pub struct InstrumentedExecutor<E> {
    inner: E,
    monitor: Arc<dyn QueryMonitor>,
    hook: Option<Arc<dyn QueryHook>>,
    config: MonitorConfig,
}

impl<E: Executor> InstrumentedExecutor<E> {
    /// Wrap `inner` with no monitoring.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            monitor: Arc::new(NoopMonitor),
            hook: None,
            config: MonitorConfig::default(),
        }
    }

    /// Set the monitor configuration.
    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the query monitor.
    pub fn with_monitor<M: QueryMonitor + 'static>(mut self, monitor: M) -> Self {
        self.monitor = Arc::new(monitor);
        self
    }

    /// Set the query monitor from an Arc.
    pub fn with_monitor_arc(mut self, monitor: Arc<dyn QueryMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    /// Set a query hook.
    pub fn with_hook<H: QueryHook + 'static>(mut self, hook: H) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Check if monitoring is enabled.
    pub fn is_monitoring_enabled(&self) -> bool {
        self.config.monitoring_enabled
    }

    /// Get the current configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Get a reference to the inner executor.
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Get the inner executor, consuming this wrapper.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Executor> Executor for InstrumentedExecutor<E> {
    fn execute(&self, sql: String, params: ParamList, callback: Callback) {
        let ctx = QueryContext::new(&sql, params.len());

        if let Some(hook) = &self.hook {
            if let HookAction::Abort(reason) = hook.before_query(&ctx) {
                callback(Err(OrmError::Other(format!("statement aborted by hook: {reason}"))));
                return;
            }
        }

        if !self.config.monitoring_enabled {
            self.inner.execute(sql, params, callback);
            return;
        }

        self.monitor.on_query_start(&ctx);
        let monitor = Arc::clone(&self.monitor);
        let config = self.config.clone();
        let start = Instant::now();

        self.inner.execute(
            sql,
            params,
            Box::new(move |result: OrmResult<u64>| {
                let duration = start.elapsed();
                monitor.on_query_complete(&ctx, duration, &QueryResult::from(&result));
                if config.is_slow(duration) {
                    monitor.on_slow_query(&ctx, duration);
                }
                callback(result);
            }),
        );
    }
}
