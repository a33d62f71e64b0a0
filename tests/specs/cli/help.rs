//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn nbs_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn nbs_help_lists_session_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("start")
        .stdout_has("stop")
        .stdout_has("poll")
        .stdout_has("report")
        .stdout_has("config");
}

#[test]
fn nbs_report_help_shows_subcommands() {
    cli()
        .args(&["report", "--help"])
        .passes()
        .stdout_has("ready")
        .stdout_has("stopped")
        .stdout_has("error");
}

#[test]
fn nbs_start_help_shows_flags() {
    cli()
        .args(&["start", "--help"])
        .passes()
        .stdout_has("--image")
        .stdout_has("--project <UUID=ID>")
        .stdout_has("--env <KEY=VALUE>");
}
