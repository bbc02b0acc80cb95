//! # pgmodel
//!
//! Schema-driven models for PostgreSQL.
//!
//! ## Features
//!
//! - **Declared schemas**: each column has a type (Integer, Boolean, Text),
//!   mutability, nullability and an optional default
//! - **Checked writes**: values are coerced to the column type; unknown and
//!   immutable columns are rejected
//! - **Dump / load**: ordered, JSON-serializable snapshots of an instance
//! - **Parameterized SQL**: INSERT/UPDATE statements with `$n` placeholders,
//!   values always bound separately
//! - **Non-blocking execution**: statements run on tokio and report through a callback
//! - **Monitoring**: timing, statistics and `tracing` output for executed statements
//!
//! ## Example
//!
//! ```ignore
//! use pgmodel::prelude::*;
//! use std::sync::Arc;
//!
//! let items = create_model_type(
//!     ModelDefinition::builder()
//!         .key("id")
//!         .sql_table("items")
//!         .column("id", ColumnSpec::integer().immutable())
//!         .column("name", ColumnSpec::text()),
//! )?;
//!
//! let datasource = Arc::new(SqlDataSource::new(PgExecutor::new(client)?));
//! let mut item = items.new_instance_with(datasource);
//! item.set("name", "Fred")?;
//!
//! // INSERT INTO items (items.name) VALUES ($1)
//! item.create(|result| println!("{result:?}"))?;
//! ```

pub mod datasource;
pub mod error;
pub mod executor;
pub mod model;
pub mod monitor;
pub mod prelude;
pub mod qb;
pub mod schema;
pub mod value;

pub use datasource::{DataSource, Persistable, SqlDataSource, build_descriptor};
pub use error::{OrmError, OrmResult};
pub use executor::{Callback, Executor, PgExecutor};
pub use model::{
    Dump, Dynamic, Model, ModelDefinition, ModelDefinitionBuilder, ModelKind, ModelType,
    create_model_type,
};
pub use monitor::{
    HookAction, InstrumentedExecutor, MonitorConfig, NoopMonitor, QueryContext, QueryHook,
    QueryMonitor, QueryResult, QueryStats, QueryType, StatsMonitor,
};
pub use qb::{ActionDescriptor, CompiledQuery, Method, ParamList, build_query};
pub use schema::{ColumnDef, ColumnSpec, ColumnType, coerce};
pub use value::Value;

#[cfg(feature = "pool")]
pub use executor::{PoolExecutor, create_pool, create_pool_with_config};

#[cfg(feature = "tracing")]
pub use monitor::TracingMonitor;
