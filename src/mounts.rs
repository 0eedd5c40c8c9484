//! Mount-table inspection for the noexec check.
//!
//! The check is best effort: the bypass launcher only needs to know whether
//! staging is required, and any failure to answer is treated as "not noexec"
//! so the bundle is executed in place.

use std::fs;
use std::path::{Path, PathBuf};

/// Kernel mount table for the current process.
pub const MOUNT_TABLE: &str = "/proc/self/mounts";

/// One line of the mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub source: String,
    pub mount_point: PathBuf,
    pub fstype: String,
    pub options: Vec<String>,
}

impl MountEntry {
    /// True when the mount carries the given option. Exact match, so
    /// `noexec` is not confused with an option it merely prefixes.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Parse mount-table content into entries. Lines without the
/// source/mount-point/fstype/options fields are skipped.
pub fn parse_mount_table(content: &str) -> Vec<MountEntry> {
    let mut entries = Vec::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        entries.push(MountEntry {
            source: fields[0].to_string(),
            mount_point: PathBuf::from(unescape_mount_field(fields[1])),
            fstype: fields[2].to_string(),
            options: fields[3].split(',').map(str::to_string).collect(),
        });
    }
    entries
}

/// Decode the octal escapes the kernel uses for whitespace and backslashes
/// in mount fields (\040 space, \011 tab, \012 newline, \134 backslash).
fn unescape_mount_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let digits: String = chars.clone().take(3).collect();
        if digits.len() == 3 && digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            if let Ok(code) = u8::from_str_radix(&digits, 8) {
                out.push(code as char);
                chars.nth(2);
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// The mount entry backing `path`: the longest mount point that is a
/// component-wise prefix of it. Later table lines win ties, matching mount
/// order for overmounted paths.
pub fn mount_point_for<'a>(entries: &'a [MountEntry], path: &Path) -> Option<&'a MountEntry> {
    entries
        .iter()
        .filter(|entry| path.starts_with(&entry.mount_point))
        .max_by_key(|entry| entry.mount_point.components().count())
}

/// Best-effort check of whether the mount backing `path` disables
/// execution. Any failure to answer yields false.
pub fn is_noexec(path: &Path) -> bool {
    let content = match fs::read_to_string(MOUNT_TABLE) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("Could not read {}: {}", MOUNT_TABLE, e);
            return false;
        }
    };
    let entries = parse_mount_table(&content);
    let query = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    match mount_point_for(&entries, &query) {
        Some(entry) => {
            let noexec = entry.has_option("noexec");
            if noexec {
                log::debug!(
                    "{} sits on noexec mount {} ({})",
                    path.display(),
                    entry.mount_point.display(),
                    entry.fstype
                );
            }
            noexec
        }
        None => {
            log::debug!("No mount entry backs {}", query.display());
            false
        }
    }
}
