use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{document_service, print_json, Command};
use crate::config::DocsignConfig;
use crate::documents::{CreateDocument, UploadedFile};

pub struct UploadCommand {
    pub path: PathBuf,
    pub owner: String,
    pub signers: Vec<String>,
}

impl UploadCommand {
    pub fn new(path: PathBuf, owner: String) -> Self {
        Self {
            path,
            owner,
            signers: Vec::new(),
        }
    }

    pub fn with_signers(mut self, signers: Vec<String>) -> Self {
        self.signers = signers;
        self
    }
}

impl Command for UploadCommand {
    async fn execute(&self, config: &DocsignConfig) -> Result<()> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        // The service repairs names that arrive as Latin-1 decoded UTF-8
        let original_name: String = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().bytes().map(char::from).collect())
            .unwrap_or_default();

        let service = document_service(config).await?;
        let document = service
            .create_document(CreateDocument {
                file: Some(UploadedFile::new(original_name, bytes)),
                signers: self.signers.clone(),
                owner: self.owner.clone(),
            })
            .await?;

        print_json(&document)
    }
}
