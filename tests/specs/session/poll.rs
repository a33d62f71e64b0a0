//! `nbs poll` specs
//!
//! Poll is a single read that always exits zero.

use crate::prelude::*;

#[test]
fn ready_session_is_running() {
    let server = MockServer::start();
    let lookup = mock_record(
        &server,
        SESSION,
        "u1",
        json!({"status": "READY", "ip": "10.0.0.5", "port": 8888}),
    );

    nbs(&server)
        .args(&["poll", "alice"])
        .passes()
        .stdout_eq("running\n");
    lookup.assert_hits(1);
}

#[test]
fn stop_submitted_session_is_still_running() {
    let server = MockServer::start();
    mock_record(&server, SESSION, "u1", json!({"status": "STOP_SUBMITTED"}));

    nbs(&server)
        .args(&["poll", "alice"])
        .passes()
        .stdout_eq("running\n");
}

#[test]
fn missing_session_is_not_running() {
    let server = MockServer::start();
    mock_missing(&server, SESSION);

    nbs(&server)
        .args(&["poll", "alice"])
        .passes()
        .stdout_eq("not running (exit status 0)\n");
}

#[test]
fn store_outage_is_not_running() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/meta/v2/data");
        then.status(503)
            .json_body(json!({"status": "error", "message": "maintenance"}));
    });

    let result = nbs(&server).args(&["poll", "alice", "-o", "json"]).passes();
    assert_eq!(result.stdout_json(), json!({"running": false, "exit_status": 0}));
}

#[test]
fn poll_never_creates_a_record() {
    let server = MockServer::start();
    mock_missing(&server, SESSION);
    let create = server.mock(|when, then| {
        when.method(POST).path("/meta/v2/data");
        then.status(201);
    });

    nbs(&server).args(&["poll", "alice"]).passes();
    create.assert_hits(0);
}
