use anyhow::Result;

use super::{document_service, print_json, Command};
use crate::config::DocsignConfig;

pub struct ShowCommand {
    pub id: String,
}

impl ShowCommand {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

impl Command for ShowCommand {
    async fn execute(&self, config: &DocsignConfig) -> Result<()> {
        let service = document_service(config).await?;
        let view = service.get_by_id(&self.id).await?;
        print_json(&view)
    }
}
