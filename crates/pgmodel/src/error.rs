//! Error types for pgmodel

use thiserror::Error;

/// Result type alias for pgmodel operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for model and database operations
#[derive(Debug, Error)]
pub enum OrmError {
    /// A model definition was built without a schema
    #[error("No schema provided")]
    MissingSchema,

    /// Read, write or load referenced a field the schema does not declare
    #[error("No schema property '{0}'")]
    UnknownField(String),

    /// Write attempted on a field declared as immutable
    #[error("Property '{0}' is not mutable")]
    ImmutableField(String),

    /// `create`/`update` on a model whose definition has no primary key
    #[error("Model does not have a primary key set")]
    NoPrimaryKey,

    /// `create`/`update` on an instance with no data source bound
    #[error("No datasource bound to model")]
    NoDataSource,

    /// The model definition has no table mapped for the named data source
    #[error("No table mapped for datasource '{0}'")]
    MissingTable(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl OrmError {
    /// Create an unknown field error
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    /// Create an immutable field error
    pub fn immutable_field(name: impl Into<String>) -> Self {
        Self::ImmutableField(name.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is an unknown field error
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField(_))
    }

    /// Check if this is an immutable field error
    pub fn is_immutable_field(&self) -> bool {
        matches!(self, Self::ImmutableField(_))
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Parse a tokio_postgres error into a more specific OrmError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                "23514" => return Self::CheckViolation(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for OrmError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

impl From<serde_json::Error> for OrmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
