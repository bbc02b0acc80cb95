//! Schema-driven models.
//!
//! - [`ModelDefinition`]: normalized schema, primary key and table mapping
//! - [`ModelType`]: the factory output, shared by all its instances
//! - [`Model`]: one instance's field values, checked against the schema on every write
//! - [`Dump`]: an ordered snapshot of an instance, loadable into another instance

mod definition;
mod dump;
mod factory;
mod instance;

#[cfg(test)]
mod tests;

pub use definition::{ModelDefinition, ModelDefinitionBuilder, SQL_DATASOURCE};
pub use dump::Dump;
pub use factory::{Dynamic, ModelKind, ModelType, create_model_type};
pub use instance::Model;
