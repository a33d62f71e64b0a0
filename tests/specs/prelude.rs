//! Test helpers for behavioral specifications.
//!
//! Provides a high-level DSL for running the nbs CLI against a mocked
//! Agave deployment.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub use httpmock::prelude::*;
pub use serde_json::json;

pub const TENANT: &str = "tacc";
pub const INSTANCE: &str = "prod";
pub const ACTOR: &str = "actor-42";
pub const SESSION: &str = "alice-tacc-prod-JHub";
pub const TENANT_CONFIG: &str = "config.tacc.prod.jhub";

// Fast polling so start/stop specs settle in well under a second.
const POLL_INTERVAL_MS: &str = "20";
const START_TIMEOUT_SECS: &str = "2";

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR is stale.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn nbs_binary() -> PathBuf {
    binary_path("nbs")
}

/// CLI builder with an empty environment.
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// CLI builder configured for the default tenant against `server`.
pub fn nbs(server: &MockServer) -> CliBuilder {
    cli()
        .env("AGAVE_BASE_URL", server.base_url())
        .env("AGAVE_SERVICE_TOKEN", "svc-token")
        .env("TENANT", TENANT)
        .env("INSTANCE", INSTANCE)
        .env("ACTOR_ID", ACTOR)
        .env("NBS_POLL_INTERVAL_MS", POLL_INTERVAL_MS)
        .env("NBS_START_TIMEOUT_SECS", START_TIMEOUT_SECS)
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            // Errors are asserted on stderr; keep the log out of the way
            envs: vec![("NBS_LOG".into(), "off".into())],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.envs.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(nbs_binary());
        cmd.args(&self.args);

        // Spawner settings come only from what the test sets
        cmd.env_clear();
        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Parse stdout as JSON
    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).expect("stdout should be JSON")
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

// =============================================================================
// Agave mocks
// =============================================================================

fn name_query(name: &str) -> String {
    json!({ "name": name }).to_string()
}

/// Answer lookups of `name` with a single record `uuid` holding `value`.
pub fn mock_record<'a>(
    server: &'a MockServer,
    name: &str,
    uuid: &str,
    value: serde_json::Value,
) -> httpmock::Mock<'a> {
    let body = json!({
        "status": "success",
        "result": [{ "uuid": uuid, "name": name, "value": value }],
    });
    let query = name_query(name);
    server.mock(|when, then| {
        when.method(GET)
            .path("/meta/v2/data")
            .query_param("q", query.as_str());
        then.status(200).json_body(body);
    })
}

/// Answer lookups of `name` with an empty listing.
pub fn mock_missing<'a>(server: &'a MockServer, name: &str) -> httpmock::Mock<'a> {
    let query = name_query(name);
    server.mock(|when, then| {
        when.method(GET)
            .path("/meta/v2/data")
            .query_param("q", query.as_str());
        then.status(200)
            .json_body(json!({ "status": "success", "result": [] }));
    })
}

/// Accept updates to record `uuid`.
pub fn mock_update<'a>(server: &'a MockServer, uuid: &str) -> httpmock::Mock<'a> {
    let path = format!("/meta/v2/data/{uuid}");
    server.mock(|when, then| {
        when.method(POST).path(path.as_str());
        then.status(200)
            .json_body(json!({ "status": "success", "result": null }));
    })
}

/// Accept actor messages whose body contains `partial`.
pub fn mock_actor<'a>(server: &'a MockServer, partial: serde_json::Value) -> httpmock::Mock<'a> {
    let path = format!("/actors/v2/{ACTOR}/messages");
    server.mock(|when, then| {
        when.method(POST)
            .path(path.as_str())
            .json_body_partial(partial.to_string());
        then.status(200).json_body(json!({
            "status": "success",
            "result": { "executionId": "exec-1" },
        }));
    })
}

/// Tenant bundle offering one image.
pub fn tenant_bundle() -> serde_json::Value {
    json!({
        "images": ["taccsciapps/jupyteruser-base:1.2"],
        "uid": 458981,
        "gid": 816877,
        "volume_mounts": ["/work/{tenant_id}/{username}:/home/jupyter/work:rw"],
    })
}
