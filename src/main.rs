mod api;
mod attachments;
mod cli;
mod client;
mod commands;
mod config;
mod error;
mod lenient;
mod queries;
mod responses;
mod server;
#[cfg(test)]
mod testing;
mod types;

use std::io;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use rmcp::ServiceExt;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use client::LinearClient;
use config::Config;
use server::LinearMcp;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            for cause in e.chain().skip(1) {
                eprintln!("Caused by: {cause}");
            }
        }

        std::process::exit(1);
    }
}

/// Stdout carries the MCP channel, so logs go to stderr.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "linear_mcp=debug"
    } else {
        "linear_mcp=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.subcommand() {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "linear-mcp", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        Commands::Serve => {
            init_tracing(cli.verbose);

            let config = Config::load()?;
            let api_key = config.api_key()?;
            let api_url = config.api_url(cli.api_url.as_deref())?;

            info!(%api_url, "Starting Linear MCP server on stdio");
            let http = reqwest::Client::builder()
                .user_agent(concat!("linear-mcp/", env!("CARGO_PKG_VERSION")))
                .build()?;
            let client = LinearClient::new(api_key)
                .with_url(api_url)
                .with_http_client(http);

            let service = LinearMcp::new(client)
                .serve(rmcp::transport::stdio())
                .await
                .context("failed to start MCP server")?;
            let client_name = service
                .peer()
                .peer_info()
                .map(|info| info.client_info.name.clone())
                .unwrap_or_default();
            info!(client = %client_name, "MCP client connected");
            service.waiting().await?;
            info!("MCP client disconnected");
        }
    }

    Ok(())
}
