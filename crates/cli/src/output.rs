// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use nbs_core::{SessionRecord, TenantConfig};
use std::io::Write;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json(out: &mut dyn Write, value: &serde_json::Value) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Human-readable record summary, one `field: value` per line.
pub fn format_record(record: &SessionRecord) -> String {
    let mut lines = vec![
        format!("name:     {}", record.key.record_name()),
        format!("id:       {}", record.id),
        format!("status:   {}", record.status),
    ];
    if let Some(endpoint) = &record.endpoint {
        lines.push(format!("endpoint: {endpoint}"));
    }
    if let Some(url) = &record.url {
        lines.push(format!("url:      {url}"));
    }
    if let Some(detail) = &record.error_detail {
        lines.push(format!("error:    {detail}"));
    }
    lines.join("\n")
}

pub fn format_tenant_config(tenant: &str, instance: &str, config: &TenantConfig) -> String {
    let mut out = format!("{tenant}/{instance}\n");
    out.push_str("images:\n");
    for image in &config.images {
        out.push_str(&format!("  {image}\n"));
    }
    if config.hpc_available {
        let hpc = config.hpc_image.as_deref().unwrap_or("(not set)");
        out.push_str(&format!("  HPC -> {hpc}\n"));
    }
    if !config.volume_mounts.is_empty() {
        out.push_str("volume mounts:\n");
        for mount in &config.volume_mounts {
            out.push_str(&format!("  {mount}\n"));
        }
    }
    let ids = match (config.uid, config.gid) {
        (Some(uid), Some(gid)) => format!("{uid}:{gid}"),
        (Some(uid), None) => format!("{uid}"),
        _ => "from user profile".to_string(),
    };
    out.push_str(&format!("uid/gid: {ids}\n"));
    if let Some(mem) = &config.mem_limit {
        out.push_str(&format!("mem limit: {mem}\n"));
    }
    if let Some(cpu) = config.cpu_limit {
        out.push_str(&format!("cpu limit: {cpu}\n"));
    }
    out
}
