// Document store - persistence seam for document records
//
// Backends:
// - memory: process-local, used by tests and embedders
// - json_file: single JSON file rewritten atomically, used by the CLI
// - sqlite: sqlx pool (feature = "database")

use async_trait::async_trait;

use crate::documents::{Document, DocumentId, NewDocument};
use crate::error::StoreError;

pub mod json_file;
pub mod memory;
#[cfg(feature = "database")]
pub mod sqlite;

pub use json_file::JsonFileDocumentStore;
pub use memory::InMemoryDocumentStore;
#[cfg(feature = "database")]
pub use sqlite::SqliteDocumentStore;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

/// Trait for document persistence operations
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of `owner`, newest created first
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Document>, StoreError>;

    /// Look up a single document
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, StoreError>;

    /// Assign identity and timestamps, persist, and return the stored record
    async fn create(&self, draft: NewDocument) -> Result<Document, StoreError>;

    /// Overwrite an existing record; bumps `updated_at`
    async fn save(&self, document: &Document) -> Result<Document, StoreError>;
}

/// Order records newest created first.
///
/// Records are expected in insertion order; ties on `created_at` keep the
/// most recently inserted record first.
pub(crate) fn newest_first(mut documents: Vec<Document>) -> Vec<Document> {
    documents.reverse();
    documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    documents
}
