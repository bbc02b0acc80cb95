//! Action descriptors: a pending write, decoupled from SQL syntax.

use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;

/// Statement kind of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Insert,
    Update,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Insert => "INSERT",
            Method::Update => "UPDATE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pending INSERT or UPDATE.
///
/// `fields` and `conditions` are keyed by table-qualified column names
/// (`items.name`) and keep insertion order, which is the order columns and
/// placeholders appear in the compiled SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDescriptor {
    method: Method,
    tables: Vec<String>,
    fields: IndexMap<String, Value>,
    conditions: IndexMap<String, Value>,
}

impl ActionDescriptor {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            tables: Vec::new(),
            fields: IndexMap::new(),
            conditions: IndexMap::new(),
        }
    }

    pub fn insert(table: impl Into<String>) -> Self {
        Self::new(Method::Insert).table(table)
    }

    pub fn update(table: impl Into<String>) -> Self {
        Self::new(Method::Update).table(table)
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.tables.push(table.into());
        self
    }

    /// Add a column to write.
    pub fn field(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Add an equality condition (UPDATE only).
    pub fn condition(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(column.into(), value.into());
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn conditions(&self) -> &IndexMap<String, Value> {
        &self.conditions
    }
}
