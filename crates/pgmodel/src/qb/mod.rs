//! Query builder for model writes.
//!
//! An [`ActionDescriptor`] names the statement kind, the target tables, the
//! columns to write and the columns to match. [`build_query`] turns it into
//! parameterized SQL; values never appear in the SQL text.
//!
//! ```ignore
//! use pgmodel::qb::{ActionDescriptor, build_query};
//!
//! let query = build_query(&ActionDescriptor::insert("items").field("items.name", "Fred"))?;
//! assert_eq!(query.sql, "INSERT INTO items (items.name) VALUES ($1)");
//! ```

mod build;
mod descriptor;
mod param;

pub use build::{CompiledQuery, build_query};
pub use descriptor::{ActionDescriptor, Method};
pub use param::ParamList;
