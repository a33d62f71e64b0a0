// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nbs - Notebook spawner lifecycle CLI

mod backend;
mod commands;
mod env;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use commands::config::{self, ConfigArgs};
use commands::session::{self, SessionCommand};
use nbs_adapters::{ExecutorDispatch, NoOpDispatch, TracedDispatch};
use nbs_engine::{SpawnerConfig, TenantConfigs};
use output::OutputFormat;
use tokio_util::sync::CancellationToken;

use crate::backend::Backend;

#[derive(Parser)]
#[command(
    name = "nbs",
    version,
    about = "Notebook spawner - launch and track per-user notebook servers"
)]
struct Cli {
    /// Spawner config file (default: $NBS_CONFIG, then <config dir>/nbs/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Session(SessionCommand),
    /// Tenant configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_new(env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new(env::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Format an anyhow error, deduplicating the chain.
///
/// Sources whose text already appears in the top-level message are dropped;
/// otherwise the full chain is rendered so context isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

/// Cancel the returned token on Ctrl+C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, abandoning wait");
            token.cancel();
        }
    });
    cancel
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.output;
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = SpawnerConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let backend = Backend::connect(config)?;
    let scope = backend.scope();
    let mut stdout = std::io::stdout();

    match command {
        Commands::Config(args) => {
            config::handle(args.command, &backend.records(), &scope, format, &mut stdout).await
        }
        Commands::Session(command) => {
            let tenant_configs = if command.needs_tenant_config() {
                backend.tenant_configs().await?
            } else {
                TenantConfigs::new()
            };
            if backend.config().call_actor {
                let controller = backend.controller(backend.abaco(), tenant_configs);
                run_session(command, &controller, &scope, format).await
            } else {
                tracing::info!("actor calls disabled, commands will not be sent");
                let dispatch = TracedDispatch::new(NoOpDispatch::new());
                let controller = backend.controller(dispatch, tenant_configs);
                run_session(command, &controller, &scope, format).await
            }
        }
    }
}

async fn run_session<D: ExecutorDispatch>(
    command: SessionCommand,
    controller: &nbs_engine::LifecycleController<backend::Store, D>,
    scope: &session::Scope,
    format: OutputFormat,
) -> Result<()> {
    let cancel = cancel_on_ctrl_c();
    session::handle(
        command,
        controller,
        scope,
        &cancel,
        format,
        &mut std::io::stdout(),
    )
    .await
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
