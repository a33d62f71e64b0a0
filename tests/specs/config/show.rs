//! `nbs config show` specs

use crate::prelude::*;

#[test]
fn config_show_prints_tenant_bundle() {
    let server = MockServer::start();
    mock_record(&server, TENANT_CONFIG, "cfg", tenant_bundle());

    nbs(&server).args(&["config", "show"]).passes().stdout_eq(
        "tacc/prod\n\
         images:\n  taccsciapps/jupyteruser-base:1.2\n\
         volume mounts:\n  /work/{tenant_id}/{username}:/home/jupyter/work:rw\n\
         uid/gid: 458981:816877\n",
    );
}

#[test]
fn config_show_json_round_trips_bundle() {
    let server = MockServer::start();
    mock_record(&server, TENANT_CONFIG, "cfg", tenant_bundle());

    let result = nbs(&server).args(&["config", "show", "-o", "json"]).passes();
    let value = result.stdout_json();
    assert_eq!(value["images"], json!(["taccsciapps/jupyteruser-base:1.2"]));
    assert_eq!(value["uid"], 458981);
}

#[test]
fn config_file_supplies_settings() {
    let server = MockServer::start();
    mock_record(&server, "config.designsafe.staging.jhub", "cfg", tenant_bundle());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nbs.toml");
    std::fs::write(
        &path,
        format!(
            "tenant = \"designsafe\"\ninstance = \"staging\"\nagave_base_url = \"{}\"\n\
             service_token = \"t\"\ncall_actor = false\n",
            server.base_url()
        ),
    )
    .unwrap();

    cli()
        .args(&["config", "show", "--config", path.to_str().unwrap()])
        .passes()
        .stdout_has("designsafe/staging\n");
}
