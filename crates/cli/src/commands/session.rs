// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nbs start|stop|poll|show|update` - Hub-side session commands

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use nbs_adapters::{ExecutorDispatch, MetadataStore};
use nbs_core::{Endpoint, SessionKey};
use nbs_engine::{
    LifecycleController, PollStatus, Project, Resources, StartRequest, UserIdentity,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::report::{self, ReportArgs};
use crate::output::{format_record, write_json, OutputFormat};

/// Tenant and instance every session key is built in.
#[derive(Debug, Clone)]
pub struct Scope {
    pub tenant: String,
    pub instance: String,
}

impl Scope {
    pub fn key(&self, user: &str) -> Result<SessionKey> {
        SessionKey::new(&self.tenant, &self.instance, user)
            .with_context(|| format!("invalid user {user:?}"))
    }
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Launch a notebook server and wait until it is reachable
    Start(StartArgs),
    /// Stop a notebook server and wait for the executor to confirm
    Stop {
        /// Hub username
        user: String,
    },
    /// Report whether a notebook server is running (single read)
    Poll {
        /// Hub username
        user: String,
    },
    /// Print a session record
    Show {
        /// Hub username
        user: String,
    },
    /// Tell the executor a notebook server moved
    Update {
        /// Hub username
        user: String,
        #[arg(long)]
        host: String,
        #[arg(long)]
        port: u16,
    },
    /// Executor-side status reports
    Report(ReportArgs),
}

impl SessionCommand {
    /// Only `start` consults tenant configuration.
    pub fn needs_tenant_config(&self) -> bool {
        matches!(self, SessionCommand::Start(_))
    }
}

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Hub username
    pub user: String,
    /// Image to launch; must be one the tenant offers
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub cpu_limit: Option<f64>,
    #[arg(long)]
    pub mem_limit: Option<String>,
    #[arg(long)]
    pub uid: Option<u32>,
    #[arg(long)]
    pub gid: Option<u32>,
    /// Home directory, substituted for `{tas_homeDirectory}` in mounts
    #[arg(long)]
    pub home_dir: Option<String>,
    /// Project to mount (repeatable)
    #[arg(long = "project", value_name = "UUID=ID", value_parser = parse_project)]
    pub projects: Vec<Project>,
    /// Extra server environment (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub environment: Vec<(String, String)>,
}

impl StartArgs {
    pub fn request(&self) -> StartRequest {
        StartRequest {
            requested_image: self.image.clone(),
            resources: Resources {
                cpu_limit: self.cpu_limit,
                mem_limit: self.mem_limit.clone(),
            },
            identity: UserIdentity {
                uid: self.uid,
                gid: self.gid,
                home_dir: self.home_dir.clone(),
            },
            projects: self.projects.clone(),
            environment: self.environment.iter().cloned().collect::<BTreeMap<_, _>>(),
        }
    }
}

pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

pub fn parse_project(raw: &str) -> Result<Project, String> {
    match parse_key_value(raw) {
        Ok((uuid, project_id)) if !project_id.trim().is_empty() => Ok(Project {
            uuid,
            project_id: project_id.trim().to_string(),
        }),
        _ => Err(format!("expected UUID=PROJECT_ID, got {raw:?}")),
    }
}

pub async fn handle<M: MetadataStore, D: ExecutorDispatch>(
    command: SessionCommand,
    controller: &LifecycleController<M, D>,
    scope: &Scope,
    cancel: &CancellationToken,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        SessionCommand::Start(args) => {
            let key = scope.key(&args.user)?;
            let endpoint = controller.start(&key, &args.request(), cancel).await?;
            match format {
                OutputFormat::Text => writeln!(out, "{endpoint}")?,
                OutputFormat::Json => write_json(
                    out,
                    &json!({
                        "host": endpoint.host,
                        "port": endpoint.port,
                        "url": endpoint.http_url(),
                    }),
                )?,
            }
        }
        SessionCommand::Stop { user } => {
            let key = scope.key(&user)?;
            let status = controller.stop(&key, cancel).await?;
            match format {
                OutputFormat::Text => writeln!(out, "{status}")?,
                OutputFormat::Json => write_json(out, &json!({ "status": status }))?,
            }
        }
        SessionCommand::Poll { user } => {
            let key = scope.key(&user)?;
            let status = controller.poll(&key).await;
            match (format, status) {
                (OutputFormat::Text, PollStatus::Running) => writeln!(out, "running")?,
                (OutputFormat::Text, PollStatus::NotRunning { exit_status }) => {
                    writeln!(out, "not running (exit status {exit_status})")?
                }
                (OutputFormat::Json, PollStatus::Running) => {
                    write_json(out, &json!({ "running": true, "exit_status": null }))?
                }
                (OutputFormat::Json, PollStatus::NotRunning { exit_status }) => {
                    write_json(out, &json!({ "running": false, "exit_status": exit_status }))?
                }
            }
        }
        SessionCommand::Show { user } => {
            let key = scope.key(&user)?;
            let record = controller
                .records()
                .load(&key)
                .await?
                .with_context(|| format!("no session record for {key}"))?;
            match format {
                OutputFormat::Text => writeln!(out, "{}", format_record(&record))?,
                OutputFormat::Json => {
                    let mut value = record.to_json();
                    value["id"] = json!(record.id);
                    write_json(out, &value)?
                }
            }
        }
        SessionCommand::Update { user, host, port } => {
            let key = scope.key(&user)?;
            let receipt = controller
                .update(&key, &Endpoint::new(host, port))
                .await
                .with_context(|| format!("UPDATE for {key} was not delivered"))?;
            match format {
                OutputFormat::Text => match &receipt.execution_id {
                    Some(id) => writeln!(out, "UPDATE sent (execution {id})")?,
                    None => writeln!(out, "UPDATE sent")?,
                },
                OutputFormat::Json => {
                    write_json(out, &json!({ "execution_id": receipt.execution_id }))?
                }
            }
        }
        SessionCommand::Report(args) => {
            report::handle(args.command, controller, scope, format, out).await?
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
