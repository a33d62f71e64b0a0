// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! START command builder.
//!
//! Combines a tenant's configuration with what the host knows about the
//! user (identity, projects, form choices) into the parameters the
//! executor needs to launch a notebook server.

use nbs_core::{ConfigError, SessionKey, StartParams, TenantConfig};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Environment variable through which the server finds the hub.
pub const HUB_API_URL_ENV: &str = "JUPYTERHUB_API_URL";

/// `{{`, `}}`, a `{name}` placeholder, or a stray brace.
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("constant regex pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("volume mount template {template:?}: {reason}")]
pub struct TemplateError {
    pub template: String,
    pub reason: String,
}

/// Errors building a START command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Image(#[from] ConfigError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Resource limits chosen for this launch; unset values fall back to the tenant's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resources {
    pub cpu_limit: Option<f64>,
    pub mem_limit: Option<String>,
}

/// Posix identity and home directory resolved for the user by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIdentity {
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub home_dir: Option<String>,
}

/// A shared project directory the user may mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub uuid: String,
    pub project_id: String,
}

/// Everything the host passes to `start` besides the session key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartRequest {
    pub requested_image: Option<String>,
    pub resources: Resources,
    pub identity: UserIdentity,
    pub projects: Vec<Project>,
    pub environment: BTreeMap<String, String>,
}

/// Expand `{name}` placeholders, with `{{` and `}}` as literal braces.
pub fn render_template(template: &str, vars: &BTreeMap<&str, &str>) -> Result<String, TemplateError> {
    let fail = |reason: String| TemplateError {
        template: template.to_string(),
        reason,
    };

    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();
        match whole.as_str() {
            "{{" => out.push('{'),
            "}}" => out.push('}'),
            "{" | "}" => return Err(fail(format!("unbalanced brace at offset {}", whole.start()))),
            _ => {
                let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                match vars.get(name) {
                    Some(value) => out.push_str(value),
                    None => return Err(fail(format!("unknown placeholder {{{name}}}"))),
                }
            }
        }
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// Volume mounts for a launch: rendered tenant templates, then project mounts.
pub fn volume_mounts(
    key: &SessionKey,
    config: &TenantConfig,
    request: &StartRequest,
) -> Result<Vec<String>, TemplateError> {
    let mut vars = BTreeMap::from([("username", key.username()), ("tenant_id", key.tenant())]);
    if let Some(home) = request.identity.home_dir.as_deref() {
        vars.insert("tas_homeDirectory", home);
    }

    let mut mounts = config
        .volume_mounts
        .iter()
        .map(|t| render_template(t, &vars))
        .collect::<Result<Vec<_>, _>>()?;

    if let (Some(host_root), Some(container_root)) = (
        config.host_projects_root_dir.as_deref(),
        config.container_projects_root_dir.as_deref(),
    ) {
        let host_root = host_root.trim_end_matches('/');
        let container_root = container_root.trim_end_matches('/');
        mounts.extend(request.projects.iter().map(|p| {
            format!("{host_root}/{}:{container_root}/{}:rw", p.uuid, p.project_id)
        }));
    }
    Ok(mounts)
}

/// Build the START parameters for `key`.
pub fn build_start_params(
    key: &SessionKey,
    config: &TenantConfig,
    request: &StartRequest,
    hub_api_url: &str,
) -> Result<StartParams, LaunchError> {
    let image = config.select_image(request.requested_image.as_deref())?;

    let uid = config.uid.or(request.identity.uid);
    let gid = config.gid.or(request.identity.gid).or(uid);

    let mut environment = request.environment.clone();
    environment.insert(HUB_API_URL_ENV.to_string(), hub_api_url.to_string());

    Ok(StartParams {
        name: key.server_name(),
        uid,
        gid,
        image,
        volume_mounts: volume_mounts(key, config, request)?,
        environment,
        cpu_limit: request.resources.cpu_limit.or(config.cpu_limit),
        mem_limit: request
            .resources
            .mem_limit
            .clone()
            .or_else(|| config.mem_limit.clone()),
    })
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
