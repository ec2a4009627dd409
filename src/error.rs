use thiserror::Error;

use crate::documents::DocumentStatus;

/// Errors surfaced by the document store backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document {0} does not exist in the store")]
    Missing(String),

    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[cfg(feature = "database")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Corrupt record: {reason}")]
    Corrupt { reason: String },
}

/// Errors returned by the document lifecycle operations
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Illegal status transition from {from} to {to}")]
    IllegalTransition {
        from: DocumentStatus,
        to: DocumentStatus,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to notify signers: {0}")]
    Notification(#[source] anyhow::Error),

    #[error("Blob storage error: {0}")]
    Blob(#[source] anyhow::Error),
}

/// Coarse classification used by callers to map failures onto responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    IllegalTransition,
    Unexpected,
}

impl DocumentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocumentError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            DocumentError::NotFound(_) => ErrorKind::NotFound,
            DocumentError::IllegalTransition { .. } => ErrorKind::IllegalTransition,
            DocumentError::Store(_) | DocumentError::Notification(_) | DocumentError::Blob(_) => {
                ErrorKind::Unexpected
            }
        }
    }

    /// True for failures caused by the caller's input rather than a collaborator fault
    pub fn is_caller_error(&self) -> bool {
        self.kind() != ErrorKind::Unexpected
    }
}

pub type DocumentResult<T> = Result<T, DocumentError>;
