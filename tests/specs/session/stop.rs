//! `nbs stop` and `nbs update` specs

use crate::prelude::*;

#[test]
fn stop_dispatches_and_prints_final_status() {
    let server = MockServer::start();
    mock_record(&server, SESSION, "u1", json!({"status": "STOPPED"}));
    let update = server.mock(|when, then| {
        when.method(POST)
            .path("/meta/v2/data/u1")
            .json_body_partial(json!({"value": {"status": "STOP_SUBMITTED"}}).to_string());
        then.status(200).json_body(json!({"status": "success", "result": null}));
    });
    let actor = mock_actor(
        &server,
        json!({"message": {"command": "STOP", "params": {"name": "alice-tacc-prod-Jhub"}}}),
    );

    nbs(&server)
        .args(&["stop", "alice"])
        .passes()
        .stdout_eq("STOPPED\n");

    update.assert_hits(1);
    actor.assert_hits(1);
}

#[test]
fn stop_times_out_when_executor_never_confirms() {
    let server = MockServer::start();
    mock_record(
        &server,
        SESSION,
        "u1",
        json!({"status": "READY", "ip": "10.0.0.5", "port": 8888}),
    );
    mock_update(&server, "u1");
    mock_actor(&server, json!({"message": {"command": "STOP"}}));

    nbs(&server)
        .env("NBS_MAX_POLL_ATTEMPTS", "3")
        .args(&["stop", "alice"])
        .fails()
        .stderr_has("stop failed: timed out waiting for STOPPED after 3 attempts");
}

#[test]
fn update_prints_execution_id() {
    let server = MockServer::start();
    let actor = mock_actor(
        &server,
        json!({"message": {"command": "UPDATE", "params": {"ip": "10.0.0.7", "port": 8000}}}),
    );

    nbs(&server)
        .args(&["update", "alice", "--host", "10.0.0.7", "--port", "8000"])
        .passes()
        .stdout_eq("UPDATE sent (execution exec-1)\n");
    actor.assert_hits(1);
}

#[test]
fn rejected_update_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(format!("/actors/v2/{ACTOR}/messages"));
        then.status(404)
            .json_body(json!({"status": "error", "message": "actor not found"}));
    });

    nbs(&server)
        .args(&["update", "alice", "--host", "h", "--port", "1"])
        .fails()
        .stderr_has("UPDATE for alice-tacc-prod-JHub was not delivered");
}
