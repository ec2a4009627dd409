use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::Instrument;

use docsign::cli::commands::{
    Command, ConfigCommand, InviteCommand, ListCommand, ShowCommand, StatusCommand, UploadCommand,
};
use docsign::cli::{Cli, Commands};
use docsign::{
    create_document_span, document_metrics, generate_correlation_id, init_telemetry, DocsignConfig,
    DocumentError,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e:#}");
            match e.downcast_ref::<DocumentError>() {
                Some(doc_err) if doc_err.is_caller_error() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let _ = DocsignConfig::load_env_file();
    let config = DocsignConfig::load()?;
    init_telemetry(&config.observability)?;

    let correlation_id = generate_correlation_id();
    let (operation, document_id, owner) = describe(&cli.command);
    let span = create_document_span(
        operation,
        document_id.as_deref(),
        owner.as_deref(),
        Some(&correlation_id),
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(
        async {
            match cli.command {
                Commands::Upload {
                    path,
                    owner,
                    signers,
                } => {
                    UploadCommand::new(path, owner)
                        .with_signers(signers)
                        .execute(&config)
                        .await
                }
                Commands::List { owner } => ListCommand::new(owner).execute(&config).await,
                Commands::Show { id } => ShowCommand::new(id).execute(&config).await,
                Commands::Status { id, status } => {
                    StatusCommand::new(id, status).execute(&config).await
                }
                Commands::Invite { id, emails } => {
                    InviteCommand::new(id, emails).execute(&config).await
                }
                Commands::Config => ConfigCommand.execute(&config).await,
            }
        }
        .instrument(span),
    );

    document_metrics().log_stats();
    result
}

fn describe(command: &Commands) -> (&'static str, Option<String>, Option<String>) {
    match command {
        Commands::Upload { owner, .. } => ("upload", None, Some(owner.clone())),
        Commands::List { owner } => ("list", None, Some(owner.clone())),
        Commands::Show { id } => ("show", Some(id.clone()), None),
        Commands::Status { id, .. } => ("status", Some(id.clone()), None),
        Commands::Invite { id, .. } => ("invite", Some(id.clone()), None),
        Commands::Config => ("config", None, None),
    }
}
