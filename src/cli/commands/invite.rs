use anyhow::Result;

use super::{document_service, print_json, Command};
use crate::config::DocsignConfig;

pub struct InviteCommand {
    pub id: String,
    pub emails: Vec<String>,
}

impl InviteCommand {
    pub fn new(id: String, emails: Vec<String>) -> Self {
        Self { id, emails }
    }
}

impl Command for InviteCommand {
    async fn execute(&self, config: &DocsignConfig) -> Result<()> {
        let service = document_service(config).await?;
        let invitation = service.add_signers_and_notify(&self.id, &self.emails).await?;
        if !invitation.notified {
            eprintln!("⚠️  Signers were saved but could not be notified");
        }
        print_json(&invitation)
    }
}
