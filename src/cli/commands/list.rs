use anyhow::Result;

use super::{document_service, print_json, Command};
use crate::config::DocsignConfig;

pub struct ListCommand {
    pub owner: String,
}

impl ListCommand {
    pub fn new(owner: String) -> Self {
        Self { owner }
    }
}

impl Command for ListCommand {
    async fn execute(&self, config: &DocsignConfig) -> Result<()> {
        let service = document_service(config).await?;
        let documents = service.list_by_owner(&self.owner).await?;
        print_json(&documents)
    }
}
