use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;
use thiserror::Error;

/// Rejected identifier input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid document ID format: {0:?}")]
pub struct InvalidDocumentId(pub String);

/// 12-byte object identifier rendered as 24 lowercase hex characters.
///
/// Layout: 4-byte big-endian creation seconds, 5 bytes unique to the
/// process, 3-byte wrapping counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId([u8; 12]);

static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(|| {
    let mut unique = [0u8; 5];
    rand::rng().fill(&mut unique[..]);
    unique
});

static COUNTER: LazyLock<AtomicU32> = LazyLock::new(|| AtomicU32::new(rand::rng().random()));

impl DocumentId {
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    pub fn generate_at(at: DateTime<Utc>) -> Self {
        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&(at.timestamp() as u32).to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// True when `candidate` can be parsed as an identifier
    pub fn is_valid(candidate: &str) -> bool {
        candidate.parse::<DocumentId>().is_ok()
    }

    /// Creation second embedded in the identifier
    pub fn timestamp(&self) -> DateTime<Utc> {
        let mut secs = [0u8; 4];
        secs.copy_from_slice(&self.0[..4]);
        DateTime::from_timestamp(u32::from_be_bytes(secs) as i64, 0).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 24 {
            return Err(InvalidDocumentId(s.to_string()));
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidDocumentId(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for DocumentId {
    type Error = InvalidDocumentId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.to_string()
    }
}
