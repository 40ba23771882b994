use assert_cmd::prelude::*;
use std::process::Command;

fn zkillstats() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("zkillstats"));
    cmd.env_remove("ZKILLSTATS_CONFIG")
        .env_remove("ZKILLSTATS_API_HOST");
    cmd
}

#[test]
fn version_prints_crate_version() -> Result<(), Box<dyn std::error::Error>> {
    let assert = zkillstats().arg("version").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("zkillstats version"));

    Ok(())
}

#[test]
fn missing_id_renders_sentinel_without_network() -> Result<(), Box<dyn std::error::Error>> {
    let assert = zkillstats()
        .arg("members")
        .arg("--no-cache")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), "No ID specified.");

    Ok(())
}

#[test]
fn assets_prints_footer_block() -> Result<(), Box<dyn std::error::Error>> {
    let assert = zkillstats().arg("assets").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("<script>"));
    assert!(stdout.contains(".zkill-stat"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn members_renders_combined_block() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _one = server
        .mock("GET", "/api/stats/corporationID/1/")
        .with_status(200)
        .with_body(r#"{"info":{"memberCount":10}}"#)
        .create();
    let _two = server
        .mock("GET", "/api/stats/corporationID/2/")
        .with_status(200)
        .with_body(r#"{"info":{"memberCount":5}}"#)
        .create();

    let assert = zkillstats()
        .arg("members")
        .arg("--id")
        .arg("1,1,2")
        .arg("--no-cache")
        .env("ZKILLSTATS_API_HOST", &api_host)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("data-count='15'"));
    assert!(stdout.contains("Members"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn upstream_failure_renders_na() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _m = server
        .mock("GET", "/api/stats/allianceID/99/")
        .with_status(500)
        .create();

    let assert = zkillstats()
        .arg("isk")
        .arg("--id")
        .arg("99")
        .arg("--type")
        .arg("alliance")
        .arg("--no-cache")
        .env("ZKILLSTATS_API_HOST", &api_host)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), "N/A");

    Ok(())
}
