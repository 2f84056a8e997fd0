use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Already initialized: {0} exists")]
    AlreadyInitialized(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures reported by the persistence layer.
///
/// Resolvers pass these through untouched; each one becomes an entry in the
/// response `errors` list with `extensions.code` set from [`StoreError::code`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Unique constraint failed on {entity}: {key}")]
    UniqueViolation { entity: &'static str, key: String },

    #[error("Foreign key constraint failed on {entity}.{field}: {key}")]
    ForeignKey {
        entity: &'static str,
        field: &'static str,
        key: String,
    },

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "NOT_FOUND",
            StoreError::UniqueViolation { .. } => "UNIQUE_VIOLATION",
            StoreError::ForeignKey { .. } => "FOREIGN_KEY_VIOLATION",
            StoreError::Poisoned | StoreError::Snapshot(_) => "INTERNAL",
        }
    }
}

impl ErrorExtensions for StoreError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

pub type Result<T> = std::result::Result<T, PostboardError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
