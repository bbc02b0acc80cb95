//! Model types: reusable constructors produced from a definition.

use super::definition::{ModelDefinition, ModelDefinitionBuilder};
use super::instance::Model;
use crate::datasource::DataSource;
use crate::error::OrmResult;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A statically declared model.
///
/// Implement this on a marker type to give a model its own Rust type. Extra
/// instance behavior is then added with a local trait implemented for
/// `Model<YourKind>`:
///
/// ```ignore
/// struct Event;
///
/// impl ModelKind for Event {
///     fn definition() -> ModelDefinitionBuilder {
///         ModelDefinition::builder()
///             .key("id")
///             .column("id", ColumnSpec::integer().immutable())
///             .column("name", ColumnSpec::text().default_value("Dave"))
///     }
/// }
///
/// trait EventExt {
///     fn upper_name(&mut self) -> OrmResult<()>;
/// }
///
/// impl EventExt for Model<Event> {
///     fn upper_name(&mut self) -> OrmResult<()> {
///         let name = self.get("name").map(|v| v.to_text().to_uppercase());
///         self.set("name", name)?;
///         Ok(())
///     }
/// }
///
/// let events = ModelType::<Event>::declare()?;
/// let mut event = events.new_instance();
/// event.upper_name()?;
/// ```
pub trait ModelKind: Send + Sync + 'static {
    fn definition() -> ModelDefinitionBuilder;
}

/// Kind marker for models whose definition is only known at runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dynamic;

/// A model type: a shared definition plus a constructor for instances.
///
/// Cloning is cheap; clones and all instances share one definition.
pub struct ModelType<K = Dynamic> {
    definition: Arc<ModelDefinition>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ModelKind> ModelType<K> {
    /// Build the model type declared by `K`.
    pub fn declare() -> OrmResult<Self> {
        Self::from_builder(K::definition())
    }
}

impl<K> ModelType<K> {
    /// Normalize `builder` into a model type.
    ///
    /// Fails with `MissingSchema` if no schema was declared.
    pub fn from_builder(builder: ModelDefinitionBuilder) -> OrmResult<Self> {
        Ok(Self::from_definition(builder.build()?))
    }

    pub fn from_definition(definition: ModelDefinition) -> Self {
        Self {
            definition: Arc::new(definition),
            _kind: PhantomData,
        }
    }

    pub fn definition(&self) -> &ModelDefinition {
        &self.definition
    }

    /// A new instance with every column at its default, no data source bound.
    pub fn new_instance(&self) -> Model<K> {
        Model::new(Arc::clone(&self.definition), None)
    }

    /// A new instance bound to `datasource`.
    pub fn new_instance_with(&self, datasource: Arc<dyn DataSource>) -> Model<K> {
        Model::new(Arc::clone(&self.definition), Some(datasource))
    }
}

impl<K> Clone for ModelType<K> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            _kind: PhantomData,
        }
    }
}

impl<K> fmt::Debug for ModelType<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("definition", &self.definition)
            .finish()
    }
}

/// Create a model type from a runtime definition.
///
/// # Example
/// ```ignore
/// let items = pgmodel::create_model_type(
///     ModelDefinition::builder()
///         .key("id")
///         .sql_table("items")
///         .column("id", ColumnType::Integer)
///         .column("name", ColumnType::Text),
/// )?;
/// let item = items.new_instance();
/// ```
pub fn create_model_type(builder: ModelDefinitionBuilder) -> OrmResult<ModelType<Dynamic>> {
    ModelType::from_builder(builder)
}
