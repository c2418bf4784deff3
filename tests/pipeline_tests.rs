//! Linux branch pipeline test against a stub toolchain.
//!
//! The stub dotnet reports success without building anything; the publish
//! output it would have produced is laid out beforehand, so the test
//! exercises the stage sequencing and the files that leave the packager.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;

use openutau_release::cli::OutputManager;
use openutau_release::platform::PlatformProfile;
use openutau_release::version::{ReleaseVersion, VersionSource};
use openutau_release::{ReleaseConfig, pipeline};

#[tokio::test]
async fn linux_branch_ships_the_builtin_plugin() {
    let dir = tempfile::tempdir().expect("tempdir");

    // Stub dotnet so restore and publish succeed without a toolchain.
    let tools = dir.path().join("tools");
    std::fs::create_dir_all(&tools).expect("mkdir");
    let stub = tools.join("dotnet");
    std::fs::write(&stub, "#!/bin/sh\nexit 0\n").expect("write");
    let mut perms = std::fs::metadata(&stub).expect("metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&stub, perms).expect("chmod");

    // PATH is mutated once, before any process spawns; this is the only
    // test in this binary.
    let path = format!("{}:{}", tools.display(), std::env::var("PATH").expect("PATH"));
    unsafe { std::env::set_var("PATH", &path) };

    // Publish output the stub toolchain would have produced.
    let work = dir.path().join("work");
    let build_dir = work.join("bin/linux-x64");
    std::fs::create_dir_all(&build_dir).expect("mkdir");
    std::fs::write(build_dir.join("OpenUtau"), b"\x7fELF").expect("write");
    let plugin_dir = work.join("OpenUtau.Plugin.Builtin/bin/Release/netstandard2.1");
    std::fs::create_dir_all(&plugin_dir).expect("mkdir");
    std::fs::write(plugin_dir.join("OpenUtau.Plugin.Builtin.dll"), b"dll").expect("write");

    let config = ReleaseConfig {
        version: ReleaseVersion::resolve(Some("1.2.3.4".to_string()), VersionSource::default()),
        work_dir: work.clone(),
    };
    let profile = PlatformProfile::for_host("linux", "x86_64");
    let artifacts = pipeline::run(&config, &profile, &OutputManager::new())
        .await
        .expect("pipeline");

    // The plugin binary must land in the directory the tarball is built from.
    assert!(build_dir.join("OpenUtau.Plugin.Builtin.dll").is_file());

    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].filename, "OpenUtau-linux-x64.tar.gz");
    assert!(work.join("OpenUtau-linux-x64.tar.gz").is_file());
    assert!(work.join("appcast.linux-x64.xml").is_file());
}
