use std::fs;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use crate::bundle;
use crate::types::{LauncherError, Result};

/// Fixed prefix for staging directories.
pub const STAGING_PREFIX: &str = "/tmp/hosts-studio";

/// Per-invocation staging directory, suffixed with the process id so
/// sibling invocations cannot collide.
pub fn staging_dir_for(pid: u32) -> PathBuf {
    PathBuf::from(format!("{}-{}", STAGING_PREFIX, pid))
}

/// Create the staging directory. A directory left over from an earlier
/// invocation with a recycled pid is reused as-is.
pub fn create_staging_dir(dir: &Path) -> Result<()> {
    match fs::DirBuilder::new().mode(0o755).create(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(LauncherError::Staging(format!(
            "Failed to create staging directory {}: {}",
            dir.display(),
            e
        ))),
    }
}

/// Copy the bundle payload subtree into the staging directory, producing
/// `<staging>/usr/...`.
pub fn copy_payload(bundle_root: &Path, staging_dir: &Path) -> Result<()> {
    let source = bundle::payload_dir(bundle_root);
    let target = staging_dir.join(bundle::PAYLOAD_SUBDIR);
    log::debug!(
        "Staging payload from {} to {}",
        source.display(),
        target.display()
    );
    copy_tree(&source, &target)
}

fn copy_tree(source: &Path, target: &Path) -> Result<()> {
    if !source.exists() {
        return Err(LauncherError::Staging(format!(
            "Source directory does not exist: {}",
            source.display()
        )));
    }

    fs::create_dir_all(target).map_err(|e| {
        LauncherError::Staging(format!(
            "Failed to create directory {}: {}",
            target.display(),
            e
        ))
    })?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let source_path = entry.path();
        let target_path = target.join(entry.file_name());
        let file_type = fs::symlink_metadata(&source_path)?.file_type();

        if file_type.is_symlink() {
            // Interpreter payloads ship python3 as a link to the versioned
            // binary; the link is recreated, not followed.
            let link_target = fs::read_link(&source_path)?;
            if fs::symlink_metadata(&target_path).is_ok() {
                fs::remove_file(&target_path)?;
            }
            std::os::unix::fs::symlink(&link_target, &target_path)?;
        } else if file_type.is_dir() {
            copy_tree(&source_path, &target_path)?;
        } else {
            fs::copy(&source_path, &target_path)?;
        }
    }

    Ok(())
}
