//! Column metadata and value coercion.
//!
//! A schema is declared with partial [`ColumnSpec`]s and normalized once, when
//! the model type is created, into fully populated [`ColumnDef`]s.

use crate::error::OrmError;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Declared type of a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnType {
    #[default]
    Integer,
    Boolean,
    Text,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::Text => "Text",
        }
    }

    /// Convert a raw value into this type's canonical representation.
    ///
    /// `Null` always stays `Null`; nullability is enforced elsewhere.
    pub fn coerce(self, raw: Value) -> Value {
        if raw.is_null() {
            return Value::Null;
        }
        match self {
            Self::Integer => raw.to_integer(),
            Self::Boolean => Value::Bool(raw.is_truthy()),
            Self::Text => match raw {
                Value::Text(s) => Value::Text(s),
                other => Value::Text(other.to_text()),
            },
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "text" => Ok(Self::Text),
            _ => Err(OrmError::validation(format!("unknown column type '{s}'"))),
        }
    }
}

/// A user-supplied column declaration. Every property is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSpec {
    pub column_type: Option<ColumnType>,
    pub mutable: Option<bool>,
    pub nullable: Option<bool>,
    pub default: Option<Value>,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    pub fn integer() -> Self {
        Self::new().of_type(ColumnType::Integer)
    }

    pub fn boolean() -> Self {
        Self::new().of_type(ColumnType::Boolean)
    }

    pub fn text() -> Self {
        Self::new().of_type(ColumnType::Text)
    }

    pub fn mutable(mut self, mutable: bool) -> Self {
        self.mutable = Some(mutable);
        self
    }

    /// Shorthand for `mutable(false)`.
    pub fn immutable(self) -> Self {
        self.mutable(false)
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Fill in omitted properties: Integer, mutable, not nullable, no default.
    ///
    /// A supplied default is coerced to the column type so that fresh instances
    /// hold canonical values. A `Null` default counts as no default.
    pub fn normalize(&self) -> ColumnDef {
        let column_type = self.column_type.unwrap_or_default();
        let default = self
            .default
            .clone()
            .map(|v| column_type.coerce(v))
            .filter(|v| !v.is_null());

        ColumnDef {
            column_type,
            mutable: self.mutable.unwrap_or(true),
            nullable: self.nullable.unwrap_or(false),
            default,
        }
    }
}

impl From<ColumnType> for ColumnSpec {
    fn from(column_type: ColumnType) -> Self {
        ColumnSpec::new().of_type(column_type)
    }
}

/// Fully populated, immutable column metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    column_type: ColumnType,
    mutable: bool,
    nullable: bool,
    default: Option<Value>,
}

impl ColumnDef {
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The value a freshly constructed instance holds for this column.
    pub fn initial_value(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }

    /// Coerce a raw value for storage in this column.
    pub fn coerce(&self, raw: Value) -> Value {
        self.column_type.coerce(raw)
    }
}

impl Default for ColumnDef {
    fn default() -> Self {
        ColumnSpec::new().normalize()
    }
}

/// Convert `raw` into the canonical representation for `column`.
pub fn coerce(column: &ColumnDef, raw: impl Into<Value>) -> Value {
    column.coerce(raw.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_defaults() {
        let def = ColumnSpec::new().normalize();
        assert_eq!(def.column_type(), ColumnType::Integer);
        assert!(def.is_mutable());
        assert!(!def.is_nullable());
        assert_eq!(def.default_value(), None);
        assert_eq!(def.initial_value(), Value::Null);
        assert_eq!(def, ColumnDef::default());
    }

    #[test]
    fn test_normalize_overrides() {
        let def = ColumnSpec::text()
            .immutable()
            .nullable(true)
            .default_value("Dave")
            .normalize();
        assert_eq!(def.column_type(), ColumnType::Text);
        assert!(!def.is_mutable());
        assert!(def.is_nullable());
        assert_eq!(def.initial_value(), Value::from("Dave"));
    }

    #[test]
    fn test_default_is_coerced_to_column_type() {
        let def = ColumnSpec::integer().default_value("10").normalize();
        assert_eq!(def.initial_value(), Value::Int(10));

        let def = ColumnSpec::boolean().default_value(false).normalize();
        assert_eq!(def.initial_value(), Value::Bool(false));

        let def = ColumnSpec::text().default_value(Value::Null).normalize();
        assert_eq!(def.default_value(), None);
    }

    #[test]
    fn test_coerce_by_type() {
        let int = ColumnSpec::integer().normalize();
        let boolean = ColumnSpec::boolean().normalize();
        let text = ColumnSpec::text().normalize();

        assert_eq!(coerce(&int, "123"), Value::Int(123));
        assert_eq!(coerce(&int, "nope"), Value::NaN);
        assert_eq!(coerce(&boolean, 0), Value::Bool(false));
        assert_eq!(coerce(&boolean, "yes"), Value::Bool(true));
        assert_eq!(coerce(&text, 200), Value::from("200"));
        assert_eq!(coerce(&text, true), Value::from("true"));

        for def in [&int, &boolean, &text] {
            assert_eq!(coerce(def, Value::Null), Value::Null);
        }
    }

    #[test]
    fn test_coerce_is_idempotent() {
        let defs = [
            ColumnSpec::integer().normalize(),
            ColumnSpec::boolean().normalize(),
            ColumnSpec::text().normalize(),
        ];
        let inputs = [
            Value::from("42x"),
            Value::Int(0),
            Value::Float(2.5),
            Value::Bool(true),
            Value::from(""),
            Value::NaN,
            Value::Null,
        ];
        for def in &defs {
            for input in &inputs {
                let once = def.coerce(input.clone());
                assert_eq!(def.coerce(once.clone()), once, "{def:?} / {input:?}");
            }
        }
    }

    #[test]
    fn test_column_type_from_str() {
        assert_eq!("Integer".parse::<ColumnType>().unwrap(), ColumnType::Integer);
        assert_eq!("boolean".parse::<ColumnType>().unwrap(), ColumnType::Boolean);
        assert_eq!("TEXT".parse::<ColumnType>().unwrap(), ColumnType::Text);
        assert!("Float".parse::<ColumnType>().is_err());
        assert_eq!(ColumnType::Text.to_string(), "Text");
    }
}
