use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Opaque failure reported by an external collaborator (store, resolver).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("collaborator failure: {0}")]
pub struct ResolveError(pub String);

impl ResolveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Reasons a mutation request cannot be merged into a ledger entry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MergeError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Account not found: {}", display_id(.0))]
    AccountNotFound(Option<Uuid>),
    #[error("Amount must be positive")]
    AmountMustBePositive,
    #[error("Receiver not found: {}", display_id(.0))]
    ReceiverNotFound(Option<Uuid>),
    #[error("Asset not found: {0}")]
    AssetNotFound(Uuid),
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl MergeError {
    /// A required reference did not resolve.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MergeError::AccountNotFound(_)
                | MergeError::ReceiverNotFound(_)
                | MergeError::AssetNotFound(_)
                | MergeError::CategoryNotFound(_)
        )
    }

    /// The request content itself is invalid.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MergeError::AmountMustBePositive | MergeError::MissingField(_)
        )
    }
}

fn display_id(id: &Option<Uuid>) -> String {
    id.map_or_else(|| "<unset>".to_string(), |id| id.to_string())
}

/// Unified error type for the engine's services, configuration and storage adapter.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),
    #[error("Amount overflow while summing account {0}")]
    AmountOverflow(Uuid),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, EngineError>;

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::ConfigError(err.to_string())
    }
}
