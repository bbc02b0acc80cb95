//! Data sources persist model instances.
//!
//! A [`DataSource`] receives a read-only view of an instance ([`Persistable`])
//! plus a completion callback. [`SqlDataSource`] turns the view into an
//! [`ActionDescriptor`](crate::qb::ActionDescriptor), compiles it, and hands the
//! statement to an [`Executor`](crate::executor::Executor).

mod sql;


pub use sql::{SqlDataSource, build_descriptor};

use crate::error::OrmResult;
use crate::executor::Callback;
use crate::model::{Dump, ModelDefinition};

/// What a data source needs to know about an instance.
pub trait Persistable {
    /// The instance's model definition.
    fn definition(&self) -> &ModelDefinition;

    /// A snapshot of the instance's current values.
    fn dump(&self) -> Dump;
}

/// A persistence backend for model instances.
///
/// Both entry points return once the work is scheduled; the outcome is
/// delivered to `callback`. An `Err` return means nothing was scheduled and the
/// callback will not fire.
pub trait DataSource: Send + Sync {
    /// Persist a new instance.
    fn create(&self, model: &dyn Persistable, callback: Callback) -> OrmResult<()>;

    /// Persist changes to an existing instance.
    fn update(&self, model: &dyn Persistable, callback: Callback) -> OrmResult<()>;
}
