use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{newest_first, DocumentStore};
use crate::documents::{Document, DocumentId, NewDocument};
use crate::error::StoreError;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    documents: Vec<Document>,
}

/// Store keeping every record in one JSON file.
///
/// Each write rewrites the whole file through a temporary sibling and a
/// rename, so readers never observe a half-written collection.
pub struct JsonFileDocumentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<StoreFile, StoreError> {
        if !self.path.exists() {
            debug!(file = ?self.path, "No document file yet, starting empty");
            return Ok(StoreFile {
                version: FORMAT_VERSION,
                documents: Vec::new(),
            });
        }

        let contents = fs::read_to_string(&self.path).await?;
        let file: StoreFile = serde_json::from_str(&contents)?;
        if file.version != FORMAT_VERSION {
            return Err(StoreError::Corrupt {
                reason: format!(
                    "unsupported document file version {} (expected {})",
                    file.version, FORMAT_VERSION
                ),
            });
        }
        Ok(file)
    }

    async fn persist(&self, file: &StoreFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let serialized = serde_json::to_string_pretty(file)?;

        // Write to temporary file first, then rename (atomic operation)
        let temp_file = format!("{}.tmp", self.path.display());
        fs::write(&temp_file, serialized).await?;
        fs::rename(&temp_file, &self.path).await?;

        debug!(
            file = ?self.path,
            documents = file.documents.len(),
            "Document file persisted"
        );
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileDocumentStore {
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Document>, StoreError> {
        let _guard = self.lock.lock().await;
        let file = self.load().await?;
        let owned = file
            .documents
            .into_iter()
            .filter(|doc| doc.owner == owner)
            .collect();
        Ok(newest_first(owned))
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        let _guard = self.lock.lock().await;
        let file = self.load().await?;
        Ok(file.documents.into_iter().find(|doc| doc.id == *id))
    }

    async fn create(&self, draft: NewDocument) -> Result<Document, StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.load().await?;

        let now = Utc::now();
        let document = draft.into_document(DocumentId::generate_at(now), now);
        file.documents.push(document.clone());
        self.persist(&file).await?;

        info!(
            document_id = %document.id,
            file = ?self.path,
            "Document record created"
        );
        Ok(document)
    }

    async fn save(&self, document: &Document) -> Result<Document, StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.load().await?;

        let slot = file
            .documents
            .iter_mut()
            .find(|doc| doc.id == document.id)
            .ok_or_else(|| StoreError::Missing(document.id.to_string()))?;

        let mut updated = document.clone();
        updated.updated_at = Utc::now();
        *slot = updated.clone();
        self.persist(&file).await?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{DocumentStatus, Signer};
    use crate::store::test_support::draft;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state/documents.json");

        let created = {
            let store = JsonFileDocumentStore::new(&path);
            store.create(draft("0xabc", "lease.pdf")).await.unwrap()
        };

        let reopened = JsonFileDocumentStore::new(&path);
        let found = reopened.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(!temp_dir.path().join("state/documents.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileDocumentStore::new(temp_dir.path().join("none.json"));
        assert!(store.find_by_owner("0xabc").await.unwrap().is_empty());
        assert!(store
            .find_by_id(&DocumentId::generate())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_save_persists_changes() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileDocumentStore::new(temp_dir.path().join("documents.json"));
        let mut doc = store.create(draft("0xabc", "a.pdf")).await.unwrap();

        doc.signers.push(Signer::invited("second@x.com"));
        doc.status = DocumentStatus::AwaitingSignatures;
        store.save(&doc).await.unwrap();

        let found = store.find_by_id(&doc.id).await.unwrap().unwrap();
        assert_eq!(found.signers.len(), 2);
        assert_eq!(found.status, DocumentStatus::AwaitingSignatures);
    }

    #[tokio::test]
    async fn test_owner_listing_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileDocumentStore::new(temp_dir.path().join("documents.json"));
        let older = store.create(draft("0xabc", "older.pdf")).await.unwrap();
        store.create(draft("0xzzz", "other.pdf")).await.unwrap();
        let newer = store.create(draft("0xabc", "newer.pdf")).await.unwrap();

        let ids: Vec<_> = store
            .find_by_owner("0xabc")
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_unsupported_version_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("documents.json");
        std::fs::write(&path, r#"{"version": 99, "documents": []}"#).unwrap();

        let store = JsonFileDocumentStore::new(&path);
        assert!(matches!(
            store.find_by_owner("0xabc").await,
            Err(StoreError::Corrupt { .. })
        ));
    }
}
