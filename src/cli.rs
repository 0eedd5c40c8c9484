use std::convert::Infallible;

use anyhow::Result;

use crate::bundle::{self, BundlePaths};
use crate::types::LauncherError;
use crate::{escalate, exec, mounts, staging};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LaunchMode {
    AppRun,
    BypassNoexec,
}

impl LaunchMode {
    fn binary_name(self) -> &'static str {
        match self {
            Self::AppRun => "apprun",
            Self::BypassNoexec => "bypass_noexec",
        }
    }
}

/// True when the real uid is root.
pub fn running_as_root() -> bool {
    nix::unistd::getuid().is_root()
}

/// Shared entry point for both launcher binaries. Returns only on failure;
/// on success the process image has been replaced.
pub fn run(mode: LaunchMode) -> Result<()> {
    env_logger::init();

    let outcome = match mode {
        LaunchMode::AppRun => launch_with_escalation(),
        LaunchMode::BypassNoexec => launch_bypassing_noexec(),
    };

    match outcome {
        Ok(never) => match never {},
        Err(LauncherError::EscalationExhausted) => {
            print_escalation_guidance(mode);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

/// The apprun flow: root execs the interpreter directly, everyone else goes
/// through the escalation chain.
fn launch_with_escalation() -> crate::types::Result<Infallible> {
    let paths = BundlePaths::rooted_at(bundle::resolve_bundle_root());
    paths.export_library_path();

    if running_as_root() {
        log::debug!("Running as root, executing the interpreter directly");
        return exec::replace_with_interpreter(&paths);
    }

    escalate::escalate_and_launch(&paths)
}

/// The bypass_noexec flow: stage the payload under /tmp when the bundle
/// sits on a noexec mount, otherwise exec in place. Privileges are the
/// caller's concern here.
fn launch_bypassing_noexec() -> crate::types::Result<Infallible> {
    let bundle_root = bundle::resolve_bundle_root();

    if mounts::is_noexec(&bundle_root) {
        println!("Detected noexec mount, copying to writable location...");

        let staging_dir = staging::staging_dir_for(std::process::id());
        staging::create_staging_dir(&staging_dir)?;
        if let Err(e) = staging::copy_payload(&bundle_root, &staging_dir) {
            eprintln!("Failed to copy files to temp directory");
            return Err(e);
        }

        let paths = BundlePaths::rooted_at(staging_dir);
        paths.export_library_path();
        return exec::replace_with_interpreter(&paths);
    }

    let paths = BundlePaths::rooted_at(bundle_root);
    paths.export_library_path();
    exec::replace_with_interpreter(&paths)
}

/// Printed when no escalation helper could be started. The suggested
/// command names the binary the user actually invoked.
fn print_escalation_guidance(mode: LaunchMode) {
    let invoked = std::env::args()
        .next()
        .unwrap_or_else(|| mode.binary_name().to_string());
    eprintln!("This application requires root privileges to modify /etc/hosts.");
    eprintln!(
        "Please run with: sudo DISPLAY=$DISPLAY XAUTHORITY=$XAUTHORITY {}",
        invoked
    );
}
