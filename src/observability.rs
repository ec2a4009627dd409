use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{info, warn};

/// Document lifecycle counters
#[derive(Debug, Default)]
pub struct DocumentMetrics {
    pub documents_created: AtomicU64,
    pub status_updates: AtomicU64,
    pub signers_invited: AtomicU64,
    pub notification_failures: AtomicU64,
    pub blobs_deduplicated: AtomicU64,
}

impl DocumentMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_document_created(&self) {
        self.documents_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_status_update(&self) {
        self.status_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_signers_invited(&self, count: usize) {
        self.signers_invited.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_notification_failure(&self) {
        self.notification_failures.fetch_add(1, Ordering::Relaxed);
        warn!("Signer notification failed");
    }

    pub fn record_blob_deduplicated(&self) {
        self.blobs_deduplicated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> DocumentStats {
        DocumentStats {
            documents_created: self.documents_created.load(Ordering::Relaxed),
            status_updates: self.status_updates.load(Ordering::Relaxed),
            signers_invited: self.signers_invited.load(Ordering::Relaxed),
            notification_failures: self.notification_failures.load(Ordering::Relaxed),
            blobs_deduplicated: self.blobs_deduplicated.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Document metrics: created={}, status_updates={}, signers_invited={}, notification_failures={}, deduplicated={}",
            stats.documents_created,
            stats.status_updates,
            stats.signers_invited,
            stats.notification_failures,
            stats.blobs_deduplicated
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStats {
    pub documents_created: u64,
    pub status_updates: u64,
    pub signers_invited: u64,
    pub notification_failures: u64,
    pub blobs_deduplicated: u64,
}

/// Global metrics instance
static DOCUMENT_METRICS: std::sync::LazyLock<DocumentMetrics> =
    std::sync::LazyLock::new(DocumentMetrics::new);

pub fn document_metrics() -> &'static DocumentMetrics {
    &DOCUMENT_METRICS
}

/// Time an operation and log its duration when finished
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_ms = duration.as_millis(),
            "Operation completed"
        );
    }
}
