// Document lifecycle manager
//
// Validates caller input, hashes and stores uploaded content, tracks signers
// and moves documents through their status lifecycle. Persistence, blob
// storage and notification are delegated to injected collaborators.

use chrono::{Duration, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{DocsignConfig, LifecycleConfig, NotifyOrder, StorageConfig};
use crate::documents::validation::{
    parse_document_id, require_owner, validate_optional_signer_emails, validate_signer_emails,
};
use crate::documents::{
    CreateDocument, Document, DocumentId, DocumentStatus, DocumentView, NewDocument, Signer,
    SignerInvitation,
};
use crate::error::{DocumentError, DocumentResult};
use crate::fs::FileSystemOperations;
use crate::hashing::{sha256_hex, storage_filename};
use crate::naming::{extension_of, redecode_latin1};
use crate::notify::Notifier;
use crate::observability::{document_metrics, OperationTimer};
use crate::store::DocumentStore;

/// What happened to a blob on upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobWrite {
    Created,
    /// An existing blob with the same digest was overwritten
    Replaced,
    /// An existing blob with the same digest was kept as-is
    Deduplicated,
}

pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
    fs: Arc<dyn FileSystemOperations>,
    storage: StorageConfig,
    lifecycle: LifecycleConfig,
}

impl DocumentService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
        fs: Arc<dyn FileSystemOperations>,
    ) -> Self {
        Self {
            store,
            notifier,
            fs,
            storage: StorageConfig::default(),
            lifecycle: LifecycleConfig::default(),
        }
    }

    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_config(self, config: &DocsignConfig) -> Self {
        self.with_storage(config.storage.clone())
            .with_lifecycle(config.lifecycle.clone())
    }

    /// Every document owned by `owner`, newest first
    pub async fn list_by_owner(&self, owner: &str) -> DocumentResult<Vec<Document>> {
        let owner = require_owner(owner)?;
        let documents = self.store.find_by_owner(owner).await?;
        debug!(owner = %owner, count = documents.len(), "Listed documents");
        Ok(documents)
    }

    pub async fn get_by_id(&self, id: &str) -> DocumentResult<DocumentView> {
        let id = parse_document_id(id)?;
        Ok(self.load(&id).await?.view())
    }

    /// Overwrite the status of a document.
    ///
    /// Unless `lifecycle.enforce_transitions` is set, any status may replace
    /// any other.
    pub async fn update_status(
        &self,
        id: &str,
        new_status: DocumentStatus,
    ) -> DocumentResult<Document> {
        let id = parse_document_id(id)?;
        let mut document = self.load(&id).await?;
        let previous = document.status;

        document.status = if self.lifecycle.enforce_transitions {
            previous.transition(new_status)?
        } else {
            if previous != new_status && !previous.can_transition_to(new_status) {
                debug!(
                    document_id = %id,
                    from = %previous,
                    to = %new_status,
                    "Accepting status change outside the transition table"
                );
            }
            new_status
        };

        let saved = self.store.save(&document).await?;
        document_metrics().record_status_update();
        info!(
            document_id = %id,
            from = %previous,
            to = %saved.status,
            "Document status updated"
        );
        Ok(saved)
    }

    /// Append signers, mark the document as awaiting signatures and notify.
    pub async fn add_signers_and_notify(
        &self,
        id: &str,
        emails: &[String],
    ) -> DocumentResult<SignerInvitation> {
        let id = parse_document_id(id)?;
        validate_signer_emails(emails)?;

        let mut document = self.load(&id).await?;
        document.signers.extend(emails.iter().map(Signer::invited));

        let invitation = match self.lifecycle.notify_order {
            NotifyOrder::NotifyFirst => {
                self.notifier
                    .notify_signers_for_review(&document)
                    .await
                    .map_err(DocumentError::Notification)?;

                document.status = DocumentStatus::AwaitingSignatures;
                let saved = self.store.save(&document).await?;
                SignerInvitation {
                    signers: saved.signers,
                    notified: true,
                }
            }
            NotifyOrder::PersistFirst => {
                document.status = DocumentStatus::AwaitingSignatures;
                let saved = self.store.save(&document).await?;

                let notified = match self.notifier.notify_signers_for_review(&saved).await {
                    Ok(()) => true,
                    Err(e) => {
                        document_metrics().record_notification_failure();
                        warn!(
                            document_id = %id,
                            error = %e,
                            "Signers saved but notification failed"
                        );
                        false
                    }
                };
                SignerInvitation {
                    signers: saved.signers,
                    notified,
                }
            }
        };

        document_metrics().record_signers_invited(emails.len());
        info!(
            document_id = %id,
            added = emails.len(),
            total = invitation.signers.len(),
            notified = invitation.notified,
            "Signers added"
        );
        Ok(invitation)
    }

    /// Hash and store an uploaded file and persist its document record
    pub async fn create_document(&self, request: CreateDocument) -> DocumentResult<Document> {
        let file = request
            .file
            .ok_or_else(|| DocumentError::InvalidArgument("File is required.".to_string()))?;
        let owner = require_owner(&request.owner)?.to_string();
        validate_optional_signer_emails(&request.signers)?;

        let timer = OperationTimer::new("create_document");

        let digest = sha256_hex(&file.bytes);
        let extension = extension_of(&file.original_name).to_string();
        let filename = storage_filename(&digest, &extension);
        let outcome = self.write_blob(&filename, &file.bytes).await?;

        let expiration_time = Utc::now() + Duration::days(i64::from(self.lifecycle.expiration_days));
        let name = redecode_latin1(&file.original_name);

        let status = if request.signers.is_empty() {
            DocumentStatus::Pending
        } else {
            DocumentStatus::AwaitingSignatures
        };

        let draft = NewDocument {
            hash: digest,
            name,
            size: file.size,
            extension,
            owner,
            status,
            expiration_time,
            signers: request.signers.iter().map(Signer::invited).collect(),
        };

        let document = self.store.create(draft).await?;
        document_metrics().record_document_created();
        timer.finish();

        info!(
            document_id = %document.id,
            owner = %document.owner,
            hash = %document.hash,
            blob = ?outcome,
            "Document created"
        );
        Ok(document)
    }

    /// Location of the stored blob for `document`
    pub fn blob_path(&self, document: &Document) -> PathBuf {
        self.storage.root.join(document.blob_filename())
    }

    async fn load(&self, id: &DocumentId) -> DocumentResult<Document> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DocumentError::NotFound(format!("Document {id} not found")))
    }

    async fn write_blob(&self, filename: &str, bytes: &[u8]) -> DocumentResult<BlobWrite> {
        let root = self.storage.root.to_string_lossy().into_owned();
        let target = self.storage.root.join(filename).to_string_lossy().into_owned();

        self.fs
            .create_dir_all(&root)
            .await
            .map_err(DocumentError::Blob)?;

        let existed = self.fs.exists(&target);
        if existed && self.storage.deduplicate {
            document_metrics().record_blob_deduplicated();
            debug!(blob = %target, "Blob already stored, skipping write");
            return Ok(BlobWrite::Deduplicated);
        }

        if self.storage.atomic_writes {
            let temp = format!("{target}.{}.tmp", uuid::Uuid::new_v4().simple());
            let written = match self.fs.write(&temp, bytes).await {
                Ok(()) => self.fs.rename(&temp, &target).await,
                Err(e) => Err(e),
            };
            if let Err(e) = written {
                if let Err(cleanup) = self.fs.remove_file(&temp).await {
                    warn!(blob = %temp, error = %cleanup, "Failed to remove temporary blob");
                } else {
                    warn!(blob = %temp, "Removed temporary blob after failed write");
                }
                return Err(DocumentError::Blob(e));
            }
        } else {
            self.fs
                .write(&target, bytes)
                .await
                .map_err(DocumentError::Blob)?;
        }

        debug!(blob = %target, bytes = bytes.len(), replaced = existed, "Blob written");
        Ok(if existed {
            BlobWrite::Replaced
        } else {
            BlobWrite::Created
        })
    }
}
