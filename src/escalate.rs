use std::convert::Infallible;
use std::env;

use crate::bundle::BundlePaths;
use crate::exec;
use crate::types::{LauncherError, Result};

/// Session variables forwarded through pkexec so the escalated process can
/// reach the invoking user's display and session bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEnv {
    pub display: String,
    pub xauthority: String,
    pub dbus_address: String,
}

impl SessionEnv {
    /// Snapshot the calling environment. DISPLAY defaults to `:0` when
    /// unset; the other variables default to empty assignments.
    pub fn capture() -> Self {
        SessionEnv {
            display: env::var("DISPLAY").unwrap_or_else(|_| ":0".to_string()),
            xauthority: env::var("XAUTHORITY").unwrap_or_default(),
            dbus_address: env::var("DBUS_SESSION_BUS_ADDRESS").unwrap_or_default(),
        }
    }
}

/// Privilege-escalation helper candidates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Helper {
    Pkexec,
    Gksudo,
    Kdesudo,
}

/// Helpers in the order they are attempted.
pub const HELPER_CHAIN: [Helper; 3] = [Helper::Pkexec, Helper::Gksudo, Helper::Kdesudo];

impl Helper {
    pub fn binary(self) -> &'static str {
        match self {
            Self::Pkexec => "pkexec",
            Self::Gksudo => "gksudo",
            Self::Kdesudo => "kdesudo",
        }
    }

    /// Argument vector for one escalation attempt. pkexec runs the
    /// interpreter through an `env` wrapper carrying the session variables;
    /// the sudo-style helpers take the command after a `--` terminator.
    pub fn argv(self, session: &SessionEnv, paths: &BundlePaths) -> Vec<String> {
        let interpreter = paths.interpreter.display().to_string();
        let script = paths.script.display().to_string();

        match self {
            Self::Pkexec => vec![
                "pkexec".to_string(),
                "env".to_string(),
                format!("DISPLAY={}", session.display),
                format!("XAUTHORITY={}", session.xauthority),
                format!("DBUS_SESSION_BUS_ADDRESS={}", session.dbus_address),
                interpreter,
                script,
            ],
            Self::Gksudo | Self::Kdesudo => vec![
                self.binary().to_string(),
                "--".to_string(),
                interpreter,
                script,
            ],
        }
    }
}

/// Attempt each helper in priority order, replacing the process image with
/// the first one that starts. Returns only when every candidate was
/// unavailable.
pub fn escalate_and_launch(paths: &BundlePaths) -> Result<Infallible> {
    let session = SessionEnv::capture();

    for helper in HELPER_CHAIN {
        let argv = helper.argv(&session, paths);
        log::debug!("Attempting privilege escalation via {}", helper.binary());
        match exec::replace_process_via_path(&argv) {
            Ok(never) => match never {},
            Err(e) => log::debug!("{} did not start: {}", helper.binary(), e),
        }
    }

    Err(LauncherError::EscalationExhausted)
}
