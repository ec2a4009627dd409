// Document data model - records, signers, identifiers and the status lifecycle

pub mod id;
pub mod status;
pub mod types;
pub mod validation;

pub use id::{DocumentId, InvalidDocumentId};
pub use status::DocumentStatus;
pub use types::{
    CreateDocument, Document, DocumentView, NewDocument, Signer, SignerInvitation, UploadedFile,
};
