//! Integration tests for the apprun binary.
//!
//! The escalation chain is exercised by pointing PATH at an empty directory
//! so no helper can be found; the direct-exec path needs root and is
//! skipped otherwise.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;

use hosts_studio_launcher::{cli, mounts};

const APPRUN_BIN: &str = env!("CARGO_BIN_EXE_apprun");

/// Lay out a minimal bundle whose interpreter is a shell stub that records
/// `$0`, its first argument, and `LD_LIBRARY_PATH` into `record`.
fn write_stub_bundle(root: &Path, record: &Path) {
    fs::create_dir_all(root.join("usr/bin")).expect("create usr/bin");
    fs::create_dir_all(root.join("usr/lib")).expect("create usr/lib");
    fs::create_dir_all(root.join("usr/share/hosts-studio"))
        .expect("create usr/share/hosts-studio");
    fs::write(
        root.join("usr/share/hosts-studio/hosts_studio.py"),
        "print('hosts studio')\n",
    )
    .expect("write entry script");

    let stub = root.join("usr/bin/python3");
    let body = format!(
        "#!/bin/sh\nprintf '%s\\n%s\\n%s\\n' \"$0\" \"$1\" \"$LD_LIBRARY_PATH\" > '{}'\n",
        record.display()
    );
    fs::write(&stub, body).expect("write stub interpreter");
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).expect("chmod stub");
}

#[test]
fn test_guidance_names_invoked_binary_when_helpers_are_missing() {
    if cli::running_as_root() {
        eprintln!("skipping: root execs the interpreter directly");
        return;
    }

    let tmp = tempfile::tempdir().expect("tempdir");
    let empty_path = tmp.path().join("empty-path");
    fs::create_dir(&empty_path).expect("create empty PATH dir");

    let output = Command::new(APPRUN_BIN)
        .env("APPDIR", tmp.path().join("bundle"))
        .env("PATH", &empty_path)
        .output()
        .expect("run apprun");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("This application requires root privileges to modify /etc/hosts."),
        "stderr: {stderr}"
    );
    assert!(
        stderr.contains("Please run with: sudo DISPLAY=$DISPLAY XAUTHORITY=$XAUTHORITY"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("apprun"), "stderr: {stderr}");
}

#[test]
fn test_root_execs_interpreter_without_helpers() {
    if !cli::running_as_root() {
        eprintln!("skipping: requires root");
        return;
    }

    let tmp = tempfile::tempdir().expect("tempdir");
    if mounts::is_noexec(tmp.path()) {
        eprintln!("skipping: temp directory is on a noexec mount");
        return;
    }

    let bundle = tmp.path().join("bundle");
    let record = tmp.path().join("record.txt");
    write_stub_bundle(&bundle, &record);

    let empty_path = tmp.path().join("empty-path");
    fs::create_dir(&empty_path).expect("create empty PATH dir");

    // With no helpers reachable, a success can only come from direct exec.
    let output = Command::new(APPRUN_BIN)
        .env("APPDIR", &bundle)
        .env("PATH", &empty_path)
        .output()
        .expect("run apprun");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let recorded = fs::read_to_string(&record).expect("stub interpreter did not run");
    assert!(
        recorded.contains("usr/bin/python3"),
        "unexpected record: {recorded}"
    );
    assert!(
        recorded.contains("usr/lib"),
        "library path not exported: {recorded}"
    );
}
