use std::convert::Infallible;
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::bundle::BundlePaths;
use crate::types::{LauncherError, Result};

/// argv[0] the interpreter sees, independent of its on-disk location.
const INTERPRETER_ARGV0: &str = "python3";

fn cstring_from_path(path: &Path) -> Result<CString> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        LauncherError::Config(format!("path contains NUL byte: {}", path.display()))
    })
}

fn cstring_from_arg(arg: &str) -> Result<CString> {
    CString::new(arg)
        .map_err(|_| LauncherError::Config(format!("argument contains NUL byte: {}", arg)))
}

/// Replace the current process image with the bundled interpreter running
/// the entry script. Returns only if the exec itself failed.
pub fn replace_with_interpreter(paths: &BundlePaths) -> Result<Infallible> {
    let program = cstring_from_path(&paths.interpreter)?;
    let argv = [
        cstring_from_arg(INTERPRETER_ARGV0)?,
        cstring_from_path(&paths.script)?,
    ];

    log::debug!(
        "Executing {} {}",
        paths.interpreter.display(),
        paths.script.display()
    );
    nix::unistd::execv(&program, &argv).map_err(|e| {
        LauncherError::Exec(format!(
            "Failed to execute {}: {}",
            paths.interpreter.display(),
            e
        ))
    })
}

/// Replace the current process image with a command resolved via PATH.
/// Returns only if the exec itself failed.
pub fn replace_process_via_path(argv: &[String]) -> Result<Infallible> {
    if argv.is_empty() {
        return Err(LauncherError::Config("Empty command for exec".to_string()));
    }

    let mut cargv = Vec::with_capacity(argv.len());
    for arg in argv {
        cargv.push(cstring_from_arg(arg)?);
    }

    nix::unistd::execvp(cargv[0].as_c_str(), &cargv)
        .map_err(|e| LauncherError::Exec(format!("Failed to execute {}: {}", argv[0], e)))
}
