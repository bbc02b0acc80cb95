use super::{DataSource, Persistable};
use crate::error::{OrmError, OrmResult};
use crate::executor::{Callback, Executor};
use crate::model::SQL_DATASOURCE;
use crate::qb::{ActionDescriptor, Method, build_query};

/// Describe the write `method` would perform for `model`.
///
/// - target table: the definition's `sql` datasource mapping
/// - fields: every dumped column except the primary key, skipping `Null`
///   values of non-nullable columns
/// - conditions: `key = <value>` when the instance carries a non-empty key
///
/// Column names are qualified with the table (`items.name`) and follow schema order.
pub fn build_descriptor(method: Method, model: &dyn Persistable) -> OrmResult<ActionDescriptor> {
    let definition = model.definition();
    let table = definition
        .sql_table()
        .ok_or_else(|| OrmError::MissingTable(SQL_DATASOURCE.to_string()))?;
    let key = definition.key();
    let dump = model.dump();

    let mut descriptor = ActionDescriptor::new(method).table(table);

    for (field, value) in dump.iter() {
        if Some(field) == key {
            continue;
        }
        // Unset non-nullable columns are left out rather than rejected.
        let nullable = definition
            .column(field)
            .is_some_and(|column| column.is_nullable());
        if value.is_null() && !nullable {
            continue;
        }
        descriptor = descriptor.field(format!("{table}.{field}"), value.clone());
    }

    if let Some(key) = key {
        if let Some(value) = dump.get(key).filter(|v| v.is_truthy()) {
            descriptor = descriptor.condition(format!("{table}.{key}"), value.clone());
        }
    }

    Ok(descriptor)
}

/// SQL data source: compiles model writes and hands them to an [`Executor`].
///
/// # Example
/// ```ignore
/// let items = Arc::new(SqlDataSource::new(PgExecutor::new(client)?));
/// let mut item = item_type.new_instance_with(items);
/// item.set("name", "Fred")?;
/// item.create(|result| println!("inserted: {result:?}"))?;
/// ```
#[derive(Debug, Clone)]
pub struct SqlDataSource<E> {
    executor: E,
}

impl<E: Executor> SqlDataSource<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Build, compile and schedule `method` for `model`.
    ///
    /// Errors are returned before the executor is called; the callback only
    /// receives execution outcomes.
    pub fn model_action(
        &self,
        method: Method,
        model: &dyn Persistable,
        callback: Callback,
    ) -> OrmResult<()> {
        let descriptor = build_descriptor(method, model)?;
        let query = build_query(&descriptor)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "pgmodel.sql",
            method = %method,
            tables = ?descriptor.tables(),
            param_count = query.params.len(),
            sql = %query.sql,
            "compiled model action"
        );

        let (sql, params) = query.into_parts();
        self.executor.execute(sql, params, callback);
        Ok(())
    }
}

impl<E: Executor> DataSource for SqlDataSource<E> {
    fn create(&self, model: &dyn Persistable, callback: Callback) -> OrmResult<()> {
        self.model_action(Method::Insert, model, callback)
    }

    /// Without a key value the statement carries no WHERE clause.
    fn update(&self, model: &dyn Persistable, callback: Callback) -> OrmResult<()> {
        self.model_action(Method::Update, model, callback)
    }
}
