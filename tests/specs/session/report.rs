//! `nbs report` and `nbs show` specs
//!
//! Executor-side writes land in the session record.

use crate::prelude::*;

#[test]
fn report_ready_writes_endpoint_and_url() {
    let server = MockServer::start();
    mock_record(&server, SESSION, "u1", json!({"status": "SUBMITTED"}));
    let update = server.mock(|when, then| {
        when.method(POST).path("/meta/v2/data/u1").json_body_partial(
            json!({"name": SESSION, "value": {
                "status": "READY",
                "ip": "10.0.0.5",
                "port": 8888,
                "url": "http://10.0.0.5:8888",
            }})
            .to_string(),
        );
        then.status(200).json_body(json!({"status": "success", "result": null}));
    });

    nbs(&server)
        .args(&["report", "ready", "alice", "--host", "10.0.0.5", "--port", "8888"])
        .passes()
        .stdout_eq("alice-tacc-prod-JHub: READY\n");
    update.assert_hits(1);
}

#[test]
fn report_error_records_detail() {
    let server = MockServer::start();
    mock_record(&server, SESSION, "u1", json!({"status": "SUBMITTED"}));
    let update = server.mock(|when, then| {
        when.method(POST).path("/meta/v2/data/u1").json_body_partial(
            json!({"value": {"status": "ERROR", "error": "out of memory"}}).to_string(),
        );
        then.status(200).json_body(json!({"status": "success", "result": null}));
    });

    nbs(&server)
        .args(&["report", "error", "alice", "out of memory"])
        .passes()
        .stdout_eq("alice-tacc-prod-JHub: ERROR\n");
    update.assert_hits(1);
}

#[test]
fn report_surfaces_store_outage() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/meta/v2/data");
        then.status(503)
            .json_body(json!({"status": "error", "message": "maintenance"}));
    });

    nbs(&server)
        .args(&["report", "stopped", "alice"])
        .fails()
        .stderr_has("metadata store unavailable");
}

#[test]
fn show_prints_record() {
    let server = MockServer::start();
    mock_record(
        &server,
        SESSION,
        "u1",
        json!({"status": "READY", "ip": "10.0.0.5", "port": 8888, "url": "http://10.0.0.5:8888"}),
    );

    nbs(&server).args(&["show", "alice"]).passes().stdout_eq(
        "name:     alice-tacc-prod-JHub\n\
         id:       u1\n\
         status:   READY\n\
         endpoint: 10.0.0.5:8888\n\
         url:      http://10.0.0.5:8888\n",
    );
}

#[test]
fn show_missing_record_fails() {
    let server = MockServer::start();
    mock_missing(&server, SESSION);

    nbs(&server)
        .args(&["show", "alice"])
        .fails()
        .stderr_has("no session record for alice-tacc-prod-JHub");
}
