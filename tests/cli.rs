use assert_cmd::Command;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::json;
use std::io::Write;

const INPUTS: [&str; 11] = [
    "INPUT_ADDON-ID",
    "INPUT_ADDON-PATH",
    "INPUT_SOURCE-PATH",
    "INPUT_APPROVAL-NOTE",
    "INPUT_COMPATIBILITY-FIREFOX-MIN",
    "INPUT_COMPATIBILITY-FIREFOX-MAX",
    "INPUT_LICENSE",
    "INPUT_RELEASE-NOTE",
    "INPUT_CHANNEL",
    "INPUT_AUTH-API-ISSUER",
    "INPUT_AUTH-API-SECRET",
];

/// The binary with a clean set of action inputs pointing at `origin`.
fn amo_publish(origin: &str) -> Command {
    let mut cmd = Command::cargo_bin("amo-publish").unwrap();
    for name in INPUTS {
        cmd.env_remove(name);
    }
    cmd.env_remove("GITHUB_OUTPUT")
        .env("AMO_BASE_URL", origin)
        .env("INPUT_ADDON-ID", "my-addon@example.com")
        .env("INPUT_ADDON-PATH", "does-not-matter.zip")
        .env("INPUT_AUTH-API-ISSUER", "user:1:2")
        .env("INPUT_AUTH-API-SECRET", "secret");
    cmd
}

// Port 9 (discard) on loopback: any request that got this far would fail to connect.
const UNREACHABLE: &str = "http://127.0.0.1:9";

#[test]
fn invalid_channel_fails_before_any_request() {
    let output = amo_publish(UNREACHABLE)
        .env("INPUT_CHANNEL", "beta")
        .env("GITHUB_ACTIONS", "true")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"::error::Invalid channel "beta". Must be "listed" or "unlisted""#));
    assert!(!stdout.contains("Failed to send request"));
}

#[test]
fn invalid_license_fails_before_any_request() {
    let output = amo_publish(UNREACHABLE)
        .env("INPUT_CHANNEL", "listed")
        .env("INPUT_LICENSE", "WTFPL")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"Invalid license "WTFPL""#));
    assert!(!stdout.contains("Failed to send request"));
}

#[test]
fn flags_work_without_runner_env() {
    let output = amo_publish(UNREACHABLE)
        .args(["--channel", "self-hosted"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(r#"Invalid channel "self-hosted""#));
}

#[tokio::test(flavor = "multi_thread")]
async fn publishes_and_writes_step_outputs() {
    let upload = |processed: bool| {
        json!({
            "uuid": "u-1",
            "channel": "unlisted",
            "processed": processed,
            "submitted": false,
            "url": "",
            "valid": true,
            "validation": null,
            "version": "1.0.0"
        })
        .to_string()
    };
    let pending = upload(false);
    let done = upload(true);
    let created = json!({
        "id": 321,
        "channel": "unlisted",
        "edit_url": "https://addons.mozilla.org/developers/addon/my-addon/versions/321",
        "version": "1.0.0"
    })
    .to_string();

    let app = Router::new()
        .route(
            "/api/v5/addons/upload/",
            post(move || async move { (StatusCode::CREATED, pending) }),
        )
        .route(
            "/api/v5/addons/upload/u-1",
            get(move || async move { done }),
        )
        .route(
            "/api/v5/addons/addon/my-addon@example.com/versions/",
            post(move || async move { (StatusCode::CREATED, created) }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let origin = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut package = tempfile::Builder::new().suffix(".zip").tempfile().unwrap();
    package.write_all(b"PK\x03\x04").unwrap();
    let outputs = tempfile::NamedTempFile::new().unwrap();

    let mut cmd = amo_publish(&origin);
    cmd.env("INPUT_ADDON-PATH", package.path())
        .env("INPUT_CHANNEL", "unlisted")
        .env("INPUT_RELEASE-NOTE", "First release")
        .env("GITHUB_OUTPUT", outputs.path());

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    assert!(output.status.success(), "{}", stdout);
    assert!(stdout.contains(r#"Version "1.0.0" has been created"#));
    assert!(stdout.contains(r#"Version "1.0.0" has been published"#));

    let written = std::fs::read_to_string(outputs.path()).unwrap();
    assert_eq!(
        written,
        "version=1.0.0\n\
         version-id=321\n\
         version-edit-url=https://addons.mozilla.org/developers/addon/my-addon/versions/321\n"
    );
}
