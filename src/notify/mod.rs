// Signer notification seam
//
// Delivery (mail, webhooks) lives outside this crate; the default notifier
// records one structured event per invited signer.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::documents::Document;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

/// Trait for telling signers a document awaits their review
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_signers_for_review(&self, document: &Document) -> Result<()>;
}

/// Notifier that emits a tracing event for every signer still to sign
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify_signers_for_review(&self, document: &Document) -> Result<()> {
        for signer in document.signers.iter().filter(|s| !s.status) {
            info!(
                document_id = %document.id,
                document_name = %document.name,
                signer = %signer.email,
                expires_at = %document.expiration_time,
                "Signature requested"
            );
        }
        Ok(())
    }
}
