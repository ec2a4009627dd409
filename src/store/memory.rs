use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{newest_first, DocumentStore};
use crate::documents::{Document, DocumentId, NewDocument};
use crate::error::StoreError;

/// Process-local store, records kept in insertion order
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.read().await;
        let owned = documents
            .iter()
            .filter(|doc| doc.owner == owner)
            .cloned()
            .collect();
        Ok(newest_first(owned))
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|doc| doc.id == *id).cloned())
    }

    async fn create(&self, draft: NewDocument) -> Result<Document, StoreError> {
        let now = Utc::now();
        let document = draft.into_document(DocumentId::generate_at(now), now);
        self.documents.write().await.push(document.clone());
        debug!(document_id = %document.id, "Document created in memory store");
        Ok(document)
    }

    async fn save(&self, document: &Document) -> Result<Document, StoreError> {
        let mut documents = self.documents.write().await;
        let slot = documents
            .iter_mut()
            .find(|doc| doc.id == document.id)
            .ok_or_else(|| StoreError::Missing(document.id.to_string()))?;

        let mut updated = document.clone();
        updated.updated_at = Utc::now();
        *slot = updated.clone();
        Ok(updated)
    }
}
