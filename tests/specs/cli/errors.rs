//! CLI error handling specs
//!
//! Verify configuration and argument errors are reported, not panicked on.

use crate::prelude::*;

#[test]
fn missing_tenant_is_reported() {
    cli()
        .env("AGAVE_SERVICE_TOKEN", "t")
        .args(&["poll", "alice"])
        .fails()
        .stderr_has("Error: failed to load config")
        .stderr_has("missing required setting TENANT");
}

#[test]
fn missing_actor_is_reported_when_calls_enabled() {
    cli()
        .env("TENANT", "tacc")
        .env("INSTANCE", "prod")
        .env("AGAVE_SERVICE_TOKEN", "t")
        .args(&["poll", "alice"])
        .fails()
        .stderr_has("missing required setting ACTOR_ID");
}

#[test]
fn invalid_poll_interval_is_reported() {
    let server = MockServer::start();
    nbs(&server)
        .env("NBS_POLL_INTERVAL_MS", "soon")
        .args(&["poll", "alice"])
        .fails()
        .stderr_has("invalid value \"soon\" for NBS_POLL_INTERVAL_MS");
}

#[test]
fn unreadable_config_file_is_reported() {
    let server = MockServer::start();
    nbs(&server)
        .args(&["poll", "alice", "--config", "/nonexistent/nbs.toml"])
        .fails()
        .stderr_has("cannot read config file /nonexistent/nbs.toml");
}

#[test]
fn unknown_config_key_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nbs.toml");
    std::fs::write(&path, "tennant = \"tacc\"\n").unwrap();

    let server = MockServer::start();
    nbs(&server)
        .args(&["poll", "alice", "--config", path.to_str().unwrap()])
        .fails()
        .stderr_has("cannot parse config file");
}

#[test]
fn unknown_command_is_usage_error() {
    let result = cli().args(&["launch", "alice"]).fails();
    assert_eq!(result.code(), Some(2));
}
