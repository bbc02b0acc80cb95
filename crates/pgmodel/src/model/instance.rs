//! Model instances: schema-checked field storage.

use super::definition::ModelDefinition;
use super::dump::Dump;
use super::factory::Dynamic;
use crate::datasource::{DataSource, Persistable};
use crate::error::{OrmError, OrmResult};
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// One instance of a model type.
///
/// Holds a value for every schema column and nothing else. Values change only
/// through [`Model::set`] and [`Model::load`].
///
/// `K` is the model kind marker; behavior specific to a model type is added by
/// implementing a local trait for `Model<K>`.
pub struct Model<K = Dynamic> {
    definition: Arc<ModelDefinition>,
    data: IndexMap<String, Value>,
    datasource: Option<Arc<dyn DataSource>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Model<K> {
    pub(crate) fn new(
        definition: Arc<ModelDefinition>,
        datasource: Option<Arc<dyn DataSource>>,
    ) -> Self {
        let mut model = Self {
            definition,
            data: IndexMap::new(),
            datasource,
            _kind: PhantomData,
        };
        model.set_up();
        model
    }

    /// Reset every column to its default (or `Null`).
    pub fn set_up(&mut self) {
        self.data = self
            .definition
            .schema()
            .iter()
            .map(|(name, column)| (name.clone(), column.initial_value()))
            .collect();
    }

    pub fn definition(&self) -> &ModelDefinition {
        &self.definition
    }

    /// Current value of `name`, or `None` if the schema has no such column.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Coerce and store a value, returning the stored value.
    ///
    /// Fails with `UnknownField` for undeclared columns and `ImmutableField`
    /// for columns declared immutable.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> OrmResult<Value> {
        let column = self
            .definition
            .column(name)
            .ok_or_else(|| OrmError::unknown_field(name))?;
        if !column.is_mutable() {
            return Err(OrmError::immutable_field(name));
        }

        let value = column.coerce(value.into());
        if let Some(slot) = self.data.get_mut(name) {
            *slot = value.clone();
        }
        Ok(value)
    }

    /// Load a dump produced by [`Model::dump`].
    ///
    /// Mutable columns go through [`Model::set`]. Immutable columns (such as a
    /// database-assigned key) are written as given; this is the only way they
    /// change after construction. Every field is checked against the schema
    /// before anything is written.
    pub fn load(&mut self, dump: Dump) -> OrmResult<()> {
        if let Some(unknown) = dump.fields().find(|f| !self.definition.has_column(f)) {
            return Err(OrmError::unknown_field(unknown));
        }

        for (name, value) in dump {
            let mutable = self
                .definition
                .column(&name)
                .is_some_and(|column| column.is_mutable());
            if mutable {
                self.set(&name, value)?;
            } else if let Some(slot) = self.data.get_mut(&name) {
                *slot = value;
            }
        }
        Ok(())
    }

    /// Snapshot of every column's current value, in schema order.
    pub fn dump(&self) -> Dump {
        Dump::from(self.data.clone())
    }

    pub fn bind_datasource(&mut self, datasource: Arc<dyn DataSource>) {
        self.datasource = Some(datasource);
    }

    pub fn unbind_datasource(&mut self) -> Option<Arc<dyn DataSource>> {
        self.datasource.take()
    }

    pub fn datasource(&self) -> Option<&Arc<dyn DataSource>> {
        self.datasource.as_ref()
    }

    /// Insert this instance through the bound data source.
    ///
    /// Fails before any I/O if the model has no primary key or no data source.
    pub fn create<F>(&self, callback: F) -> OrmResult<()>
    where
        F: FnOnce(OrmResult<u64>) + Send + 'static,
    {
        let datasource = self.persistence_target()?;
        datasource.create(self, Box::new(callback))
    }

    /// Write this instance's changes through the bound data source.
    ///
    /// Same preconditions as [`Model::create`].
    pub fn update<F>(&self, callback: F) -> OrmResult<()>
    where
        F: FnOnce(OrmResult<u64>) + Send + 'static,
    {
        let datasource = self.persistence_target()?;
        datasource.update(self, Box::new(callback))
    }

    fn persistence_target(&self) -> OrmResult<&Arc<dyn DataSource>> {
        if self.definition.key().is_none() {
            return Err(OrmError::NoPrimaryKey);
        }
        self.datasource.as_ref().ok_or(OrmError::NoDataSource)
    }
}

impl<K> Persistable for Model<K> {
    fn definition(&self) -> &ModelDefinition {
        &self.definition
    }

    fn dump(&self) -> Dump {
        Model::dump(self)
    }
}

impl<K> fmt::Debug for Model<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("data", &self.data)
            .field("key", &self.definition.key())
            .field("datasource", &self.datasource.is_some())
            .finish()
    }
}
