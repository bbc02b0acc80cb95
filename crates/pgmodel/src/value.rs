//! Dynamically typed field values.
//!
//! A [`Value`] is what a model stores for each schema field and what the query
//! builder binds as a statement parameter. Raw input may be any variant; after
//! coercion a column only ever holds `Null` or the variant matching its type
//! (`Int`/`NaN` for Integer, `Bool` for Boolean, `Text` for Text).

use crate::error::OrmError;
use bytes::BytesMut;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tokio_postgres::types::{IsNull, ToSql, Type, WrongType, to_sql_checked};

/// A single field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// SQL NULL / absent data.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Result of an Integer coercion whose input had no leading digits.
    ///
    /// Binding this as a statement parameter fails at execution time.
    NaN,
}

impl Value {
    /// Returns `true` for `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness used by Boolean coercion and by primary-key presence checks.
    ///
    /// `Null`, `false`, `0`, `0.0`, a float NaN, `""` and `NaN` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null | Value::NaN => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Text(s) => !s.is_empty(),
        }
    }

    /// Parse this value as a base-10 integer.
    ///
    /// Text takes its longest numeric prefix after leading whitespace
    /// (`"12abc"` is 12, `"3.7"` is 3). Floats truncate toward zero. Anything
    /// without digits, booleans, and out-of-range numbers yield `Value::NaN`.
    /// `Null` stays `Null`.
    pub fn to_integer(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Int(i) => Value::Int(*i),
            Value::Float(f) => truncate_float(*f).map_or(Value::NaN, Value::Int),
            Value::Text(s) => parse_int_prefix(s).map_or(Value::NaN, Value::Int),
            Value::Bool(_) | Value::NaN => Value::NaN,
        }
    }

    /// Render this value as text. `Null` renders as `"null"`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Text(s) => s.clone(),
            Value::NaN => "NaN".to_string(),
        }
    }

    /// Borrow the inner string of a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the inner integer of an `Int` value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the inner flag of a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

fn truncate_float(f: f64) -> Option<i64> {
    let t = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

fn format_float(f: f64) -> String {
    if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        f.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = OrmError;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        match v {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n.as_f64().map(Value::Float).ok_or_else(|| {
                    OrmError::Serialization(format!("unrepresentable number: {n}"))
                }),
            },
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            other => Err(OrmError::Serialization(format!(
                "expected a scalar field value, got {other}"
            ))),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null | Value::NaN => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::from(i),
            // Non-finite floats have no JSON form and map to null.
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Text(s) => serde_json::Value::String(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::NaN => serializer.serialize_f64(f64::NAN),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = serde_json::Value::deserialize(deserializer)?;
        Value::try_from(json).map_err(serde::de::Error::custom)
    }
}

type BindError = Box<dyn std::error::Error + Sync + Send>;

fn wrong_type<T>(ty: &Type) -> BindError {
    Box::new(WrongType::new::<T>(ty.clone()))
}

fn int_to_sql(i: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BindError> {
    match *ty {
        Type::INT2 => i16::try_from(i)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(i)?.to_sql(ty, out),
        Type::INT8 => i.to_sql(ty, out),
        _ if <String as ToSql>::accepts(ty) => i.to_string().to_sql(ty, out),
        _ => Err(wrong_type::<i64>(ty)),
    }
}

/// Binds each variant only to compatible column types.
///
/// Integers also bind to text columns, and text holding a whole number binds
/// to integer columns; immutable fields are stored uncoerced and may arrive
/// in either form. Anything else fails with [`WrongType`].
impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BindError> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) if <bool as ToSql>::accepts(ty) => b.to_sql(ty, out),
            Value::Bool(_) => Err(wrong_type::<bool>(ty)),
            Value::Int(i) => int_to_sql(*i, ty, out),
            Value::Float(f) => match *ty {
                Type::FLOAT4 => (*f as f32).to_sql(ty, out),
                Type::FLOAT8 => f.to_sql(ty, out),
                _ => Err(wrong_type::<f64>(ty)),
            },
            Value::Text(s) if <String as ToSql>::accepts(ty) => s.to_sql(ty, out),
            Value::Text(s) => match *ty {
                Type::INT2 | Type::INT4 | Type::INT8 => {
                    let i: i64 = s.trim().parse()?;
                    int_to_sql(i, ty, out)
                }
                _ => Err(wrong_type::<String>(ty)),
            },
            Value::NaN => Err("cannot bind NaN: integer value is not a number".into()),
        }
    }

    fn accepts(ty: &Type) -> bool {
        <bool as ToSql>::accepts(ty)
            || <i16 as ToSql>::accepts(ty)
            || <i32 as ToSql>::accepts(ty)
            || <i64 as ToSql>::accepts(ty)
            || <f32 as ToSql>::accepts(ty)
            || <f64 as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
    }

    to_sql_checked!();
}
