use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DocumentError;

/// Lifecycle status of a document under signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[default]
    Pending,
    AwaitingSignatures,
    PartiallySigned,
    FullySigned,
    Rejected,
    Archived,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 6] = [
        DocumentStatus::Pending,
        DocumentStatus::AwaitingSignatures,
        DocumentStatus::PartiallySigned,
        DocumentStatus::FullySigned,
        DocumentStatus::Rejected,
        DocumentStatus::Archived,
    ];

    /// Statuses reachable from `self` in one step
    pub fn allowed_transitions(self) -> &'static [DocumentStatus] {
        match self {
            DocumentStatus::Pending => &[DocumentStatus::Rejected],
            DocumentStatus::AwaitingSignatures => &[
                DocumentStatus::PartiallySigned,
                DocumentStatus::FullySigned,
            ],
            DocumentStatus::PartiallySigned => {
                &[DocumentStatus::FullySigned, DocumentStatus::Rejected]
            }
            DocumentStatus::FullySigned | DocumentStatus::Rejected | DocumentStatus::Archived => &[],
        }
    }

    pub fn can_transition_to(self, next: DocumentStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Check a requested move against the transition table.
    ///
    /// Re-applying the current status is accepted.
    pub fn transition(self, requested: DocumentStatus) -> Result<DocumentStatus, DocumentError> {
        if self == requested || self.can_transition_to(requested) {
            Ok(requested)
        } else {
            Err(DocumentError::IllegalTransition {
                from: self,
                to: requested,
            })
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Pending => "Pending",
            DocumentStatus::AwaitingSignatures => "AwaitingSignatures",
            DocumentStatus::PartiallySigned => "PartiallySigned",
            DocumentStatus::FullySigned => "FullySigned",
            DocumentStatus::Rejected => "Rejected",
            DocumentStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        DocumentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == normalized)
            .ok_or_else(|| DocumentError::InvalidArgument(format!("Unknown document status: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        assert_eq!(
            DocumentStatus::Pending.allowed_transitions(),
            &[DocumentStatus::Rejected]
        );
        assert!(DocumentStatus::AwaitingSignatures.can_transition_to(DocumentStatus::PartiallySigned));
        assert!(DocumentStatus::AwaitingSignatures.can_transition_to(DocumentStatus::FullySigned));
        assert!(DocumentStatus::PartiallySigned.can_transition_to(DocumentStatus::Rejected));
        assert!(!DocumentStatus::Pending.can_transition_to(DocumentStatus::AwaitingSignatures));

        for terminal in [
            DocumentStatus::FullySigned,
            DocumentStatus::Rejected,
            DocumentStatus::Archived,
        ] {
            assert!(terminal.is_terminal());
        }
        assert!(!DocumentStatus::PartiallySigned.is_terminal());
    }

    #[test]
    fn test_guarded_transition() {
        assert_eq!(
            DocumentStatus::PartiallySigned
                .transition(DocumentStatus::FullySigned)
                .unwrap(),
            DocumentStatus::FullySigned
        );
        assert!(matches!(
            DocumentStatus::FullySigned.transition(DocumentStatus::Pending),
            Err(DocumentError::IllegalTransition {
                from: DocumentStatus::FullySigned,
                to: DocumentStatus::Pending,
            })
        ));
        // Same-status writes are not moves
        assert!(DocumentStatus::Archived.transition(DocumentStatus::Archived).is_ok());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Pending".parse::<DocumentStatus>().unwrap(), DocumentStatus::Pending);
        assert_eq!(
            "awaiting-signatures".parse::<DocumentStatus>().unwrap(),
            DocumentStatus::AwaitingSignatures
        );
        assert_eq!(
            "fully_signed".parse::<DocumentStatus>().unwrap(),
            DocumentStatus::FullySigned
        );
        assert!("signed-ish".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_status_serde_uses_variant_names() {
        let json = serde_json::to_string(&DocumentStatus::PartiallySigned).unwrap();
        assert_eq!(json, "\"PartiallySigned\"");
        let parsed: DocumentStatus = serde_json::from_str("\"Archived\"").unwrap();
        assert_eq!(parsed, DocumentStatus::Archived);
        assert_eq!(DocumentStatus::default(), DocumentStatus::Pending);
    }
}
