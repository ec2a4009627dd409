use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DocumentId, DocumentStatus};

/// One invited party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub email: String,
    /// false until the signer has signed
    pub status: bool,
}

impl Signer {
    pub fn invited(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            status: false,
        }
    }
}

/// Stored document record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub hash: String,
    pub name: String,
    pub size: u64,
    pub extension: String,
    pub owner: String,
    pub status: DocumentStatus,
    pub expiration_time: DateTime<Utc>,
    pub signers: Vec<Signer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Read-only projection without audit fields
    pub fn view(&self) -> DocumentView {
        DocumentView {
            id: self.id,
            hash: self.hash.clone(),
            name: self.name.clone(),
            size: self.size,
            extension: self.extension.clone(),
            owner: self.owner.clone(),
            status: self.status,
            expiration_time: self.expiration_time,
            signers: self.signers.clone(),
        }
    }

    /// Filename the content blob is stored under
    pub fn blob_filename(&self) -> String {
        format!("{}{}", self.hash, self.extension)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub id: DocumentId,
    pub hash: String,
    pub name: String,
    pub size: u64,
    pub extension: String,
    pub owner: String,
    pub status: DocumentStatus,
    pub expiration_time: DateTime<Utc>,
    pub signers: Vec<Signer>,
}

/// Fields of a document before the store assigns its identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub hash: String,
    pub name: String,
    pub size: u64,
    pub extension: String,
    pub owner: String,
    pub status: DocumentStatus,
    pub expiration_time: DateTime<Utc>,
    pub signers: Vec<Signer>,
}

impl NewDocument {
    pub fn into_document(self, id: DocumentId, created_at: DateTime<Utc>) -> Document {
        Document {
            id,
            hash: self.hash,
            name: self.name,
            size: self.size,
            extension: self.extension,
            owner: self.owner,
            status: self.status,
            expiration_time: self.expiration_time,
            signers: self.signers,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Uploaded file payload as handed over by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub original_name: String,
    pub bytes: Vec<u8>,
    /// Declared size, recorded as-is
    pub size: u64,
}

impl UploadedFile {
    pub fn new(original_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self {
            original_name: original_name.into(),
            bytes,
            size,
        }
    }
}

/// Input of `DocumentService::create_document`
#[derive(Debug, Clone, Default)]
pub struct CreateDocument {
    pub file: Option<UploadedFile>,
    pub signers: Vec<String>,
    pub owner: String,
}

/// Result of inviting signers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignerInvitation {
    pub signers: Vec<Signer>,
    /// false when the notifier failed after the signers were persisted
    pub notified: bool,
}
