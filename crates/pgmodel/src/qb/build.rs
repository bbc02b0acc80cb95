//! Compile action descriptors into SQL text plus bind parameters.

use super::descriptor::{ActionDescriptor, Method};
use super::param::ParamList;
use crate::error::{OrmError, OrmResult};

/// SQL text with `$1..$n` placeholders and the values bound to them.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: ParamList,
}

impl CompiledQuery {
    pub fn into_parts(self) -> (String, ParamList) {
        (self.sql, self.params)
    }
}

/// Compile `descriptor` into SQL and parameters.
///
/// Field values are bound first, in field order, followed by condition values.
/// INSERT ignores conditions. UPDATE emits `WHERE` only when conditions are
/// present, joined with `AND`, and keeps numbering placeholders after the SET list.
///
/// # Example
/// ```ignore
/// let query = build_query(
///     &ActionDescriptor::update("items")
///         .field("items.name", "Frank")
///         .condition("items.id", 3),
/// )?;
/// assert_eq!(query.sql, "UPDATE items SET items.name = $1 WHERE items.id = $2");
/// ```
pub fn build_query(descriptor: &ActionDescriptor) -> OrmResult<CompiledQuery> {
    if descriptor.tables().is_empty() {
        return Err(OrmError::validation(format!(
            "{}: at least one table is required",
            descriptor.method()
        )));
    }

    let (sql, params) = match descriptor.method() {
        Method::Insert => build_insert(descriptor),
        Method::Update => build_update(descriptor)?,
    };
    Ok(CompiledQuery { sql, params })
}

fn build_insert(descriptor: &ActionDescriptor) -> (String, ParamList) {
    let tables = descriptor.tables().join(", ");
    let mut params = ParamList::new();

    if descriptor.fields().is_empty() {
        return (format!("INSERT INTO {} DEFAULT VALUES", tables), params);
    }

    let mut columns = Vec::with_capacity(descriptor.fields().len());
    let mut placeholders = Vec::with_capacity(descriptor.fields().len());
    for (column, value) in descriptor.fields() {
        let idx = params.push(value.clone());
        columns.push(column.as_str());
        placeholders.push(format!("${}", idx));
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        tables,
        columns.join(", "),
        placeholders.join(", ")
    );
    (sql, params)
}

fn build_update(descriptor: &ActionDescriptor) -> OrmResult<(String, ParamList)> {
    if descriptor.fields().is_empty() {
        return Err(OrmError::validation("UPDATE: at least one field is required"));
    }

    let mut params = ParamList::new();

    let mut set_parts = Vec::with_capacity(descriptor.fields().len());
    for (column, value) in descriptor.fields() {
        let idx = params.push(value.clone());
        set_parts.push(format!("{} = ${}", column, idx));
    }

    let mut sql = format!(
        "UPDATE {} SET {}",
        descriptor.tables().join(", "),
        set_parts.join(", ")
    );

    // Numbering continues from the SET list.
    let mut where_parts = Vec::with_capacity(descriptor.conditions().len());
    for (column, value) in descriptor.conditions() {
        let idx = params.push(value.clone());
        where_parts.push(format!("{} = ${}", column, idx));
    }
    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }

    Ok((sql, params))
}
