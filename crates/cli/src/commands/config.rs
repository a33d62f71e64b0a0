// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nbs config` - Inspect tenant configuration

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use nbs_adapters::MetadataStore;
use nbs_engine::SessionRecords;

use super::session::Scope;
use crate::output::{format_tenant_config, write_json, OutputFormat};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the tenant config record for the configured tenant and instance
    Show,
}

pub async fn handle<M: MetadataStore>(
    command: ConfigCommand,
    records: &SessionRecords<M>,
    scope: &Scope,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = records
                .load_tenant_config(&scope.tenant, &scope.instance)
                .await
                .with_context(|| {
                    format!(
                        "failed to load tenant config for {}/{}",
                        scope.tenant, scope.instance
                    )
                })?;
            match format {
                OutputFormat::Text => write!(
                    out,
                    "{}",
                    format_tenant_config(&scope.tenant, &scope.instance, &config)
                )?,
                OutputFormat::Json => write_json(out, &serde_json::to_value(&config)?)?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
