//! Integration tests for appcast generation against the on-disk feed files.

use chrono::DateTime;
use openutau_release::appcast::{appcast_filename, download_url, write_appcast};
use openutau_release::package::Artifact;
use openutau_release::platform::OsTag;
use openutau_release::version::{DEFAULT_VERSION, ReleaseVersion, VersionSource};

fn version(v: &str) -> ReleaseVersion {
    ReleaseVersion::resolve(Some(v.to_string()), VersionSource::default())
}

fn linux_artifact() -> Artifact {
    Artifact::new(
        "linux-x64",
        "OpenUtau-linux-x64.tar.gz".to_string(),
        OsTag::Linux,
    )
}

#[test]
fn linux_feed_matches_the_documented_example() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_appcast(&version("1.2.3.4"), &linux_artifact(), dir.path()).expect("write");

    assert_eq!(path, dir.path().join("appcast.linux-x64.xml"));
    let feed = std::fs::read_to_string(&path).expect("read");

    assert!(feed.contains(
        "url=\"https://github.com/JackZ2024/OpenUtau/releases/download/1.2.3.4/OpenUtau-linux-x64.tar.gz\""
    ));
    assert!(feed.contains("sparkle:os=\"linux\""));
    assert!(feed.contains("<title>OpenUtau 1.2.3.4</title>"));
}

#[test]
fn rerun_overwrites_and_leaves_exactly_one_item() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_appcast(&version("1.0.0.0"), &linux_artifact(), dir.path()).expect("first");
    let path = write_appcast(&version("2.0.0.0"), &linux_artifact(), dir.path()).expect("second");

    let feed = std::fs::read_to_string(&path).expect("read");
    assert_eq!(feed.matches("<item>").count(), 1);
    assert!(feed.contains("OpenUtau 2.0.0.0"));
    assert!(!feed.contains("OpenUtau 1.0.0.0"));
}

#[test]
fn pub_date_is_an_rfc2822_timestamp() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_appcast(&version(DEFAULT_VERSION), &linux_artifact(), dir.path())
        .expect("write");
    let feed = std::fs::read_to_string(&path).expect("read");

    let pub_date = feed
        .split("<pubDate>")
        .nth(1)
        .and_then(|rest| rest.split("</pubDate>").next())
        .expect("pubDate element");
    // Value is wall-clock dependent; only the format is checked.
    DateTime::parse_from_rfc2822(pub_date).expect("RFC 2822 timestamp");
}

#[test]
fn url_template_round_trips_for_any_inputs() {
    let cases = [
        ("0.1.547.7", "OpenUtau-win-x86.zip"),
        ("0.1.547.7", "OpenUtau-win-x64.exe"),
        ("10.20.30.40", "OpenUtau-osx-arm64.dmg"),
    ];
    for (v, filename) in cases {
        let url = download_url(&version(v), filename);
        assert_eq!(
            url,
            format!("https://github.com/JackZ2024/OpenUtau/releases/download/{v}/{filename}")
        );
    }
}

#[test]
fn one_feed_file_per_artifact_tag() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifacts = [
        Artifact::new("win-x86", "OpenUtau-win-x86.zip".to_string(), OsTag::Windows),
        Artifact::new("win-x64", "OpenUtau-win-x64.zip".to_string(), OsTag::Windows),
        Artifact::new(
            "win-x64-installer",
            "OpenUtau-win-x64.exe".to_string(),
            OsTag::Windows,
        ),
    ];

    let v = version("1.2.3.4");
    for artifact in &artifacts {
        write_appcast(&v, artifact, dir.path()).expect("write");
    }

    for artifact in &artifacts {
        assert!(dir.path().join(appcast_filename(&artifact.tag)).is_file());
    }
    let feeds = std::fs::read_dir(dir.path())
        .expect("read_dir")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".xml"))
        .count();
    assert_eq!(feeds, artifacts.len());
}
