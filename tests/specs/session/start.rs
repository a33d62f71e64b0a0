//! `nbs start` specs

use crate::prelude::*;

#[test]
fn start_dispatches_and_prints_endpoint() {
    let server = MockServer::start();
    mock_record(&server, TENANT_CONFIG, "cfg", tenant_bundle());
    // The executor has already answered by the time we poll
    mock_record(
        &server,
        SESSION,
        "u1",
        json!({"status": "READY", "ip": "10.0.0.5", "port": 8888}),
    );
    let update = mock_update(&server, "u1");
    let actor = mock_actor(
        &server,
        json!({"message": {
            "command": "START",
            "tenant": "tacc",
            "instance": "prod",
            "username": "alice",
            "service_token": "svc-token",
            "params": {"name": "alice-tacc-prod-Jhub", "image": "taccsciapps/jupyteruser-base:1.2"},
        }}),
    );

    nbs(&server)
        .args(&["start", "alice"])
        .passes()
        .stdout_eq("10.0.0.5:8888\n");

    // SUBMITTED written once, message sent once
    update.assert_hits(1);
    actor.assert_hits(1);
}

#[test]
fn start_creates_and_shares_missing_record() {
    let server = MockServer::start();
    mock_record(&server, TENANT_CONFIG, "cfg", tenant_bundle());
    mock_missing(&server, SESSION);
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/meta/v2/data")
            .json_body_partial(json!({"name": SESSION, "value": {"status": "PENDING"}}).to_string());
        then.status(201).json_body(json!({
            "status": "success",
            "result": {"uuid": "u9", "name": SESSION, "value": {"status": "PENDING"}},
        }));
    });
    let share = server.mock(|when, then| {
        when.method(POST)
            .path("/meta/v2/data/u9/pems/apitest")
            .json_body(json!({"permission": "READ_WRITE"}));
        then.status(200).json_body(json!({"status": "success"}));
    });
    mock_update(&server, "u9");
    mock_actor(&server, json!({"message": {"command": "START"}}));

    // The listing never shows the record, so the wait runs out
    nbs(&server)
        .env("NBS_START_TIMEOUT_SECS", "1")
        .args(&["start", "alice"])
        .fails()
        .stderr_has("start failed: timed out waiting for READY");

    create.assert_hits(1);
    share.assert_hits(1);
}

#[test]
fn executor_error_fails_fast() {
    let server = MockServer::start();
    mock_record(&server, TENANT_CONFIG, "cfg", tenant_bundle());
    mock_record(
        &server,
        SESSION,
        "u1",
        json!({"status": "ERROR", "error": "image pull failed"}),
    );
    mock_update(&server, "u1");
    mock_actor(&server, json!({"message": {"command": "START"}}));

    nbs(&server)
        .args(&["start", "alice"])
        .fails()
        .stderr_has("Error: start failed: session failed: image pull failed");
}

#[test]
fn unoffered_image_fails_before_any_write() {
    let server = MockServer::start();
    let mut bundle = tenant_bundle();
    bundle["images"] = json!([
        "taccsciapps/jupyteruser-base:1.2",
        "taccsciapps/jupyteruser-ds:1.2",
    ]);
    mock_record(&server, TENANT_CONFIG, "cfg", bundle);
    let session = mock_record(&server, SESSION, "u1", json!({"status": "STOPPED"}));
    let actor = mock_actor(&server, json!({"message": {"command": "START"}}));

    nbs(&server)
        .args(&["start", "alice", "--image", "not/offered:latest"])
        .fails()
        .stderr_has("not/offered:latest");

    session.assert_hits(0);
    actor.assert_hits(0);
}

#[test]
fn missing_tenant_config_is_reported() {
    let server = MockServer::start();
    mock_missing(&server, TENANT_CONFIG);

    nbs(&server)
        .args(&["start", "alice"])
        .fails()
        .stderr_has("failed to load tenant config for tacc/prod");
}

#[test]
fn disabled_actor_calls_skip_dispatch() {
    let server = MockServer::start();
    mock_record(&server, TENANT_CONFIG, "cfg", tenant_bundle());
    mock_record(
        &server,
        SESSION,
        "u1",
        json!({"status": "READY", "ip": "10.0.0.5", "port": 8888}),
    );
    mock_update(&server, "u1");
    let actor = mock_actor(&server, json!({}));

    nbs(&server)
        .env("CALL_ACTOR", "false")
        .args(&["start", "alice", "-o", "json"])
        .passes()
        .stdout_has("\"url\": \"http://10.0.0.5:8888\"");

    actor.assert_hits(0);
}
