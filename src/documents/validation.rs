// Input checks shared by the lifecycle operations

use regex::Regex;
use std::sync::LazyLock;

use super::DocumentId;
use crate::error::DocumentError;

static EMAIL_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("static email pattern"));

pub fn parse_document_id(raw: &str) -> Result<DocumentId, DocumentError> {
    raw.trim()
        .parse::<DocumentId>()
        .map_err(|e| DocumentError::InvalidArgument(e.to_string()))
}

pub fn require_owner(owner: &str) -> Result<&str, DocumentError> {
    if owner.trim().is_empty() {
        return Err(DocumentError::InvalidArgument(
            "Owner wallet is required".to_string(),
        ));
    }
    Ok(owner)
}

pub fn is_email_like(candidate: &str) -> bool {
    EMAIL_LIKE.is_match(candidate)
}

/// Reject an empty list or any entry that is not `local@domain`
pub fn validate_signer_emails(emails: &[String]) -> Result<(), DocumentError> {
    if emails.is_empty() {
        return Err(DocumentError::InvalidArgument(
            "Invalid signers list or empty.".to_string(),
        ));
    }
    validate_optional_signer_emails(emails)
}

pub fn validate_optional_signer_emails(emails: &[String]) -> Result<(), DocumentError> {
    if let Some(bad) = emails.iter().find(|email| !is_email_like(email)) {
        return Err(DocumentError::InvalidArgument(format!(
            "Signer is not an email address: {bad:?}"
        )));
    }
    Ok(())
}
