use super::*;
use crate::error::{OrmError, OrmResult};
use crate::executor::{Callback, Executor};
use crate::qb::ParamList;
use crate::value::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ── Shared ImmediateExecutor for tests ──

/// Completes every statement synchronously, failing any statement containing "fail".
#[derive(Default)]
struct ImmediateExecutor {
    executed: Mutex<Vec<String>>,
}

impl Executor for ImmediateExecutor {
    fn execute(&self, sql: String, _params: ParamList, callback: Callback) {
        let failed = sql.contains("fail");
        self.executed.lock().unwrap().push(sql);
        if failed {
            callback(Err(OrmError::Other("boom".to_string())));
        } else {
            callback(Ok(1));
        }
    }
}

fn params(n: usize) -> ParamList {
    ParamList::from(vec![Value::Int(1); n])
}

#[test]
fn test_query_type_detection() {
    assert_eq!(
        QueryType::from_sql("INSERT INTO items (items.name) VALUES ($1)"),
        QueryType::Insert
    );
    assert_eq!(
        QueryType::from_sql("  update items SET items.name = $1"),
        QueryType::Update
    );
    assert_eq!(QueryType::from_sql("INSERTED"), QueryType::Other);
    assert_eq!(QueryType::from_sql("SELECT 1"), QueryType::Other);
    assert_eq!(QueryType::from_sql(""), QueryType::Other);
}

#[test]
fn test_query_result_error_truncation() {
    let long = "x".repeat(2000);
    let QueryResult::Error(msg) = QueryResult::error(long) else {
        panic!("expected error");
    };
    assert_eq!(msg.len(), 512 + 3);
    assert!(msg.ends_with("..."));
}

#[test]
fn test_truncate_sql_respects_char_boundaries() {
    assert_eq!(truncate_sql_bytes("abc", 10), "abc");
    assert_eq!(truncate_sql_bytes("héllo", 2), "h");
}

#[test]
fn test_disabled_monitoring_passes_through() {
    let stats = Arc::new(StatsMonitor::new());
    let executor = InstrumentedExecutor::new(ImmediateExecutor::default())
        .with_monitor_arc(stats.clone());
    assert!(!executor.is_monitoring_enabled());

    let result = Arc::new(Mutex::new(None));
    let sink = result.clone();
    executor.execute(
        "INSERT INTO t (t.a) VALUES ($1)".to_string(),
        params(1),
        Box::new(move |r: OrmResult<u64>| *sink.lock().unwrap() = Some(r.unwrap())),
    );

    assert_eq!(*result.lock().unwrap(), Some(1));
    assert_eq!(stats.stats().total_queries, 0);
}

#[test]
fn test_stats_monitor_counts() {
    let stats = Arc::new(StatsMonitor::new());
    let executor = InstrumentedExecutor::new(ImmediateExecutor::default())
        .with_config(MonitorConfig::new().enable_monitoring())
        .with_monitor_arc(stats.clone());

    executor.execute("INSERT INTO t (t.a) VALUES ($1)".into(), params(1), Box::new(|_| {}));
    executor.execute("UPDATE t SET t.a = $1".into(), params(1), Box::new(|_| {}));
    executor.execute("UPDATE fail SET a = $1".into(), params(1), Box::new(|_| {}));

    let snapshot = stats.stats();
    assert_eq!(snapshot.total_queries, 3);
    assert_eq!(snapshot.failed_queries, 1);
    assert_eq!(snapshot.insert_count, 1);
    assert_eq!(snapshot.update_count, 2);

    stats.reset();
    assert_eq!(stats.stats().total_queries, 0);
    assert!(stats.stats().slowest_query.is_none());
}

#[test]
fn test_slow_query_threshold() {
    struct SlowExecutor;
    impl Executor for SlowExecutor {
        fn execute(&self, _sql: String, _params: ParamList, callback: Callback) {
            std::thread::sleep(Duration::from_millis(5));
            callback(Ok(0));
        }
    }

    let stats = Arc::new(StatsMonitor::new());
    let executor = InstrumentedExecutor::new(SlowExecutor)
        .with_config(
            MonitorConfig::new()
                .with_slow_query_threshold(Duration::from_millis(1))
                .enable_monitoring(),
        )
        .with_monitor_arc(stats.clone());
    executor.execute("INSERT INTO t (t.a) VALUES ($1)".into(), params(1), Box::new(|_| {}));

    let snapshot = stats.stats();
    assert_eq!(snapshot.slow_queries, 1);
    assert!(snapshot.max_duration >= Duration::from_millis(5));
    assert_eq!(
        snapshot.slowest_query.as_deref(),
        Some("INSERT INTO t (t.a) VALUES ($1)")
    );

    let relaxed = InstrumentedExecutor::new(SlowExecutor)
        .with_config(
            MonitorConfig::new()
                .with_slow_query_threshold(Duration::from_secs(60))
                .enable_monitoring(),
        )
        .with_monitor_arc(stats.clone());
    relaxed.execute("UPDATE t SET t.a = $1".into(), params(1), Box::new(|_| {}));
    assert_eq!(stats.stats().slow_queries, 1);
}

#[test]
fn test_monitor_sees_context() {
    struct Capture(Mutex<Vec<(QueryType, usize, QueryResult)>>);
    impl QueryMonitor for Capture {
        fn on_query_complete(&self, ctx: &QueryContext, _: Duration, result: &QueryResult) {
            self.0
                .lock()
                .unwrap()
                .push((ctx.query_type, ctx.param_count, result.clone()));
        }
    }

    let capture = Arc::new(Capture(Mutex::new(Vec::new())));
    let executor = InstrumentedExecutor::new(ImmediateExecutor::default())
        .with_config(MonitorConfig::new().enable_monitoring())
        .with_monitor_arc(capture.clone());

    executor.execute("UPDATE t SET t.a = $1 WHERE t.id = $2".into(), params(2), Box::new(|_| {}));
    executor.execute("INSERT INTO fail (a) VALUES ($1)".into(), params(1), Box::new(|_| {}));

    let seen = capture.0.lock().unwrap();
    assert_eq!(seen[0], (QueryType::Update, 2, QueryResult::Affected(1)));
    assert_eq!(seen[1].0, QueryType::Insert);
    assert!(seen[1].2.is_error());
}

#[test]
fn test_hook_can_abort() {
    struct DenyUpdates;
    impl QueryHook for DenyUpdates {
        fn before_query(&self, ctx: &QueryContext) -> HookAction {
            if ctx.query_type == QueryType::Update {
                HookAction::Abort("read-only".to_string())
            } else {
                HookAction::Continue
            }
        }
    }

    let executor = InstrumentedExecutor::new(ImmediateExecutor::default()).with_hook(DenyUpdates);

    let outcome = Arc::new(Mutex::new(None));
    let sink = outcome.clone();
    executor.execute(
        "UPDATE t SET t.a = $1".into(),
        params(1),
        Box::new(move |r: OrmResult<u64>| *sink.lock().unwrap() = Some(r.unwrap_err().to_string())),
    );
    executor.execute("INSERT INTO t (t.a) VALUES ($1)".into(), params(1), Box::new(|_| {}));

    assert!(outcome.lock().unwrap().as_deref().unwrap().contains("read-only"));
    assert_eq!(
        *executor.inner().executed.lock().unwrap(),
        vec!["INSERT INTO t (t.a) VALUES ($1)".to_string()]
    );
}
