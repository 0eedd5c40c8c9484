use std::env;
use std::path::{Path, PathBuf};

/// Environment variable the AppImage runtime sets to the mounted bundle root.
pub const APPDIR_ENV: &str = "APPDIR";

/// Loader search path consumed by the bundled interpreter.
pub const LD_LIBRARY_PATH_ENV: &str = "LD_LIBRARY_PATH";

/// Bundle-relative locations, fixed by the packaging layout.
pub const INTERPRETER_SUFFIX: &str = "usr/bin/python3";
pub const SCRIPT_SUFFIX: &str = "usr/share/hosts-studio/hosts_studio.py";
pub const LIB_DIR_SUFFIX: &str = "usr/lib";

/// Subtree under the root that holds the whole payload. Staging copies
/// exactly this subtree.
pub const PAYLOAD_SUBDIR: &str = "usr";

/// Resolve the bundle root: `$APPDIR` if set and non-empty, then the
/// working directory, then the literal current-directory marker.
/// Resolution never fails.
pub fn resolve_bundle_root() -> PathBuf {
    match env::var_os(APPDIR_ENV) {
        Some(root) if !root.is_empty() => return PathBuf::from(root),
        Some(_) => log::debug!("Ignoring empty {}", APPDIR_ENV),
        None => {}
    }
    match env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            log::debug!("Could not determine working directory: {}", e);
            PathBuf::from(".")
        }
    }
}

/// Every path the launchers need, derived from a single resolved root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePaths {
    pub root: PathBuf,
    pub interpreter: PathBuf,
    pub script: PathBuf,
    pub lib_dir: PathBuf,
}

impl BundlePaths {
    /// Derive all launch paths from one root. Computing them together keeps
    /// every exec attempt rooted at the same directory.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        BundlePaths {
            interpreter: root.join(INTERPRETER_SUFFIX),
            script: root.join(SCRIPT_SUFFIX),
            lib_dir: root.join(LIB_DIR_SUFFIX),
            root,
        }
    }

    /// Point the loader at the bundled libraries, overwriting any inherited
    /// value.
    pub fn export_library_path(&self) {
        env::set_var(LD_LIBRARY_PATH_ENV, &self.lib_dir);
    }
}

/// The directory staging copies for this root.
pub fn payload_dir(root: &Path) -> PathBuf {
    root.join(PAYLOAD_SUBDIR)
}
