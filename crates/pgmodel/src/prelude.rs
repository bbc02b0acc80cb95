//! Common imports.
//!
//! ```ignore
//! use pgmodel::prelude::*;
//! ```

pub use crate::datasource::{DataSource, Persistable, SqlDataSource};
pub use crate::error::{OrmError, OrmResult};
pub use crate::executor::{Callback, Executor, PgExecutor};
pub use crate::model::{
    Dump, Dynamic, Model, ModelDefinition, ModelDefinitionBuilder, ModelKind, ModelType,
    create_model_type,
};
pub use crate::qb::{ActionDescriptor, Method, build_query};
pub use crate::schema::{ColumnSpec, ColumnType};
pub use crate::value::Value;
