//! Model definitions: the immutable blueprint shared by every instance of a model type.

use crate::error::{OrmError, OrmResult};
use crate::schema::{ColumnDef, ColumnSpec};
use indexmap::IndexMap;

/// Name of the SQL data source in a definition's datasource mapping.
pub const SQL_DATASOURCE: &str = "sql";

/// Normalized model blueprint.
///
/// Columns keep their declaration order; generated SQL lists columns in this order.
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    schema: IndexMap<String, ColumnDef>,
    key: Option<String>,
    datasources: IndexMap<String, String>,
}

impl ModelDefinition {
    /// Start declaring a model.
    ///
    /// # Example
    /// ```ignore
    /// let def = ModelDefinition::builder()
    ///     .key("id")
    ///     .sql_table("items")
    ///     .column("id", ColumnSpec::integer().immutable())
    ///     .column("name", ColumnSpec::text())
    ///     .build()?;
    /// ```
    pub fn builder() -> ModelDefinitionBuilder {
        ModelDefinitionBuilder::default()
    }

    /// All columns in declaration order.
    pub fn schema(&self) -> &IndexMap<String, ColumnDef> {
        &self.schema
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.schema.get(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.schema.contains_key(name)
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.schema.keys().map(String::as_str)
    }

    /// Primary key column, if declared.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Table mapped for the named data source.
    pub fn table_for(&self, datasource: &str) -> Option<&str> {
        self.datasources.get(datasource).map(String::as_str)
    }

    /// Table mapped for the SQL data source.
    pub fn sql_table(&self) -> Option<&str> {
        self.table_for(SQL_DATASOURCE)
    }
}

/// Builder for [`ModelDefinition`].
#[derive(Debug, Clone, Default)]
pub struct ModelDefinitionBuilder {
    schema: Option<IndexMap<String, ColumnSpec>>,
    key: Option<String>,
    datasources: IndexMap<String, String>,
}

impl ModelDefinitionBuilder {
    /// Declare a column. Redeclaring a name replaces its spec in place.
    pub fn column(mut self, name: impl Into<String>, spec: impl Into<ColumnSpec>) -> Self {
        self.schema
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), spec.into());
        self
    }

    /// Declare the whole schema at once, replacing any previously declared columns.
    pub fn schema<N, S>(mut self, columns: impl IntoIterator<Item = (N, S)>) -> Self
    where
        N: Into<String>,
        S: Into<ColumnSpec>,
    {
        self.schema = Some(
            columns
                .into_iter()
                .map(|(name, spec)| (name.into(), spec.into()))
                .collect(),
        );
        self
    }

    /// Set the primary key column.
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.key = Some(name.into());
        self
    }

    /// Map a data source name to a table.
    pub fn datasource(mut self, name: impl Into<String>, table: impl Into<String>) -> Self {
        self.datasources.insert(name.into(), table.into());
        self
    }

    /// Shorthand for `datasource("sql", table)`.
    pub fn sql_table(self, table: impl Into<String>) -> Self {
        self.datasource(SQL_DATASOURCE, table)
    }

    /// Normalize every column and freeze the definition.
    pub fn build(self) -> OrmResult<ModelDefinition> {
        let specs = self.schema.ok_or(OrmError::MissingSchema)?;

        let schema: IndexMap<String, ColumnDef> = specs
            .into_iter()
            .map(|(name, spec)| (name, spec.normalize()))
            .collect();

        if let Some(key) = &self.key {
            if !schema.contains_key(key) {
                return Err(OrmError::validation(format!(
                    "primary key '{key}' is not a schema column"
                )));
            }
        }

        Ok(ModelDefinition {
            schema,
            key: self.key,
            datasources: self.datasources,
        })
    }
}
