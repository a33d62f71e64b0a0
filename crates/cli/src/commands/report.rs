// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nbs report` - Status writes made on the executor's behalf

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use nbs_adapters::{ExecutorDispatch, MetadataStore};
use nbs_core::Endpoint;
use nbs_engine::LifecycleController;

use super::session::Scope;
use crate::output::{write_json, OutputFormat};

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// The server is reachable
    Ready {
        /// Hub username
        user: String,
        #[arg(long)]
        host: String,
        #[arg(long)]
        port: u16,
        /// Browsable URL (defaults to http://HOST:PORT)
        #[arg(long)]
        url: Option<String>,
    },
    /// The server is gone
    Stopped {
        /// Hub username
        user: String,
    },
    /// The launch or the server failed
    Error {
        /// Hub username
        user: String,
        /// Message shown to the user
        detail: String,
    },
}

pub async fn handle<M: MetadataStore, D: ExecutorDispatch>(
    command: ReportCommand,
    controller: &LifecycleController<M, D>,
    scope: &Scope,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let record = match command {
        ReportCommand::Ready {
            user,
            host,
            port,
            url,
        } => {
            let key = scope.key(&user)?;
            controller
                .report_ready(&key, Endpoint::new(host, port), url)
                .await?
        }
        ReportCommand::Stopped { user } => controller.report_stopped(&scope.key(&user)?).await?,
        ReportCommand::Error { user, detail } => {
            controller.report_error(&scope.key(&user)?, &detail).await?
        }
    };

    match format {
        OutputFormat::Text => writeln!(out, "{}: {}", record.key.record_name(), record.status)?,
        OutputFormat::Json => write_json(out, &record.to_json())?,
    }
    Ok(())
}
