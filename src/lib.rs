// docsign - document e-signature lifecycle library
// Uploads are hashed into blob storage, tracked as document records and
// moved through a fixed signing lifecycle.

pub mod cli;
pub mod config;
pub mod documents;
pub mod error;
pub mod fs;
pub mod hashing;
pub mod naming;
pub mod notify;
pub mod observability;
pub mod service;
pub mod store;
pub mod telemetry;

// Re-export key types for easy access
pub use crate::config::{DocsignConfig, NotifyOrder};
pub use documents::{
    CreateDocument, Document, DocumentId, DocumentStatus, DocumentView, Signer, SignerInvitation,
    UploadedFile,
};
pub use error::{DocumentError, DocumentResult, ErrorKind, StoreError};
pub use fs::{FileSystemOperations, StandardFileSystem};
pub use notify::{Notifier, TracingNotifier};
pub use observability::{document_metrics, DocumentMetrics, OperationTimer};
pub use service::{BlobWrite, DocumentService};
pub use store::{DocumentStore, InMemoryDocumentStore, JsonFileDocumentStore};
pub use telemetry::{create_document_span, generate_correlation_id, init_telemetry};
