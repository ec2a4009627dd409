use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::config::DocsignConfig;
use crate::fs::StandardFileSystem;
use crate::notify::TracingNotifier;
use crate::service::DocumentService;
use crate::store::{DocumentStore, JsonFileDocumentStore};

pub mod config;
pub mod invite;
pub mod list;
pub mod show;
pub mod status;
pub mod upload;

pub use self::config::ConfigCommand;
pub use invite::InviteCommand;
pub use list::ListCommand;
pub use show::ShowCommand;
pub use status::StatusCommand;
pub use upload::UploadCommand;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self, config: &DocsignConfig) -> Result<()>;
}

/// Open the configured document store
pub async fn open_store(config: &DocsignConfig) -> Result<Arc<dyn DocumentStore>> {
    #[cfg(feature = "database")]
    if let Some(db_config) = &config.database {
        info!("Using SQLite document store at {}", db_config.url);
        let store = crate::store::SqliteDocumentStore::connect(db_config).await?;
        return Ok(Arc::new(store));
    }

    info!(file = ?config.store.path, "Using JSON document store");
    Ok(Arc::new(JsonFileDocumentStore::new(&config.store.path)))
}

/// Build the lifecycle service wired to the configured collaborators
pub async fn document_service(config: &DocsignConfig) -> Result<DocumentService> {
    let store = open_store(config).await?;
    Ok(
        DocumentService::new(store, Arc::new(TracingNotifier), Arc::new(StandardFileSystem))
            .with_config(config),
    )
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
