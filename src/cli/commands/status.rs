use anyhow::Result;

use super::{document_service, print_json, Command};
use crate::config::DocsignConfig;
use crate::documents::DocumentStatus;

pub struct StatusCommand {
    pub id: String,
    pub status: String,
}

impl StatusCommand {
    pub fn new(id: String, status: String) -> Self {
        Self { id, status }
    }
}

impl Command for StatusCommand {
    async fn execute(&self, config: &DocsignConfig) -> Result<()> {
        let status: DocumentStatus = self.status.parse()?;
        let service = document_service(config).await?;
        let document = service.update_status(&self.id, status).await?;
        print_json(&document)
    }
}
