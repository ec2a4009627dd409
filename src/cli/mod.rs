use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "docsign")]
#[command(about = "Document e-signature lifecycle manager")]
#[command(long_about = "docsign stores uploaded documents by content hash, tracks who has to sign them \
                       and moves them through the signing lifecycle. Start with 'docsign upload'.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash and store a file, then record it as a new document
    Upload {
        /// File to upload
        path: PathBuf,
        /// Wallet/account identifier of the uploading party
        #[arg(long, help = "Owner identifier recorded on the document")]
        owner: String,
        /// Signers to attach at creation (repeatable)
        #[arg(long = "signer", help = "Signer email; repeat for several signers")]
        signers: Vec<String>,
    },
    /// List documents of an owner, newest first
    List {
        #[arg(long, help = "Owner identifier to list documents for")]
        owner: String,
    },
    /// Show a single document
    Show {
        /// Document identifier (24 hex characters)
        id: String,
    },
    /// Set the status of a document
    Status {
        /// Document identifier (24 hex characters)
        id: String,
        /// Pending, AwaitingSignatures, PartiallySigned, FullySigned, Rejected or Archived
        status: String,
    },
    /// Invite signers to a document and notify them
    Invite {
        /// Document identifier (24 hex characters)
        id: String,
        /// Signer emails
        #[arg(required = true)]
        emails: Vec<String>,
    },
    /// Print the effective configuration as TOML
    Config,
}
