#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefeed");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("home"))
        .stdout(predicate::str::contains("discover"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn test_movies_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefeed");
    cmd.args(["movies", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("top-rated"))
        .stdout(predicate::str::contains("upcoming"));
}

#[test]
fn test_tv_rejects_upcoming() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefeed");
    cmd.args(["tv", "upcoming"]).assert().failure();
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefeed");
    cmd.args(["search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_show_details_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefeed");
    cmd.args(["show", "details", "--media-type", "movie"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_show_details_invalid_media_type() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefeed");
    cmd.args(["show", "details", "--media-type", "person", "--id", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown media type"));
}

#[test]
fn test_missing_api_key_fails_with_message() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefeed");
    cmd.env_remove("TMDB_API_KEY")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .args(["--dir", dir.path().to_str().unwrap(), "movies", "popular"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

#[test]
fn test_home_fails_when_every_slot_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefeed");
    cmd.env_remove("TMDB_API_KEY")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .args(["--dir", dir.path().to_str().unwrap(), "home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("all home feed slots failed"));
}

#[test]
fn test_config_api_key_is_used() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[catalog]\nbase_url = \"http://127.0.0.1:9/3/\"\napi_key = \"from-config\"\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefeed");
    cmd.env_remove("TMDB_API_KEY")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .args(["--dir", dir.path().to_str().unwrap(), "tv", "popular"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog request to /tv/popular failed"))
        .stderr(predicate::str::contains("from-config").not());
}

#[test]
fn test_invalid_config_is_reported() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[catalog\n").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefeed");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}
