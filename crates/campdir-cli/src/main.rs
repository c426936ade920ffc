//! `campdir` command-line application.
//!
//! Operator front end for the camp directory, plus a stdio MCP server.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use campdir_core::{params::SearchCamps, DirectoryBuilder, LogMailer};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, CampdirMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        mail_dry_run,
        command,
    } = Args::parse();

    let mut builder = DirectoryBuilder::new().with_database_path(database_file);
    if mail_dry_run {
        builder = builder.with_mailer(Arc::new(LogMailer));
    }
    let directory = builder
        .build()
        .await
        .context("Failed to open camp directory")?;

    info!("campdir started on {}", directory.database_path().display());

    let renderer = TerminalRenderer::new(!no_color);

    match command {
        Some(Camp { command }) => Cli::new(directory, renderer).handle_camp_command(command).await,
        Some(Term { command }) => Cli::new(directory, renderer).handle_term_command(command).await,
        Some(Parent { command }) => Cli::new(directory, renderer).handle_parent_command(command).await,
        Some(Message { command }) => Cli::new(directory, renderer).handle_message_command(command).await,
        Some(Contact(args)) => Cli::new(directory, renderer).submit_contact(args).await,
        Some(Notify { command }) => Cli::new(directory, renderer).handle_notify_command(command).await,
        Some(Settings { command }) => Cli::new(directory, renderer).handle_settings_command(command).await,
        Some(Credential { command }) => Cli::new(directory, renderer).handle_credential_command(command).await,
        Some(Serve) => {
            info!("Starting campdir MCP server");
            run_stdio_server(CampdirMcpServer::new(directory))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(directory, renderer)
                .search(&SearchCamps::default())
                .await
        }
    }
}
