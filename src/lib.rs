//! Launch helpers for the hosts-studio relocatable bundle.
//!
//! Two binaries share this crate:
//!
//! - `apprun` resolves the bundle root, points the loader at the bundled
//!   libraries, and becomes the bundled interpreter, escalating privileges
//!   through the first available graphical helper when not already root.
//! - `bypass_noexec` performs the same handoff, but first checks whether the
//!   bundle sits on a noexec mount and stages the payload under /tmp when
//!   it does.
//!
//! # Architecture
//!
//! - [`bundle`]: bundle-root resolution and the fixed path layout
//! - [`mounts`]: native mount-table inspection for the noexec check
//! - [`staging`]: pid-suffixed staging directory and payload copy
//! - [`escalate`]: ordered privilege-escalation helper chain
//! - [`exec`]: process-image replacement, the terminal action of every flow
//! - [`cli`]: entry wiring shared by both binaries
//!
//! Neither binary takes flags; behavior is driven entirely by the
//! environment and the filesystem. A successful launch never returns.

// Bundle layout and environment
pub mod bundle;

// Noexec detection
pub mod mounts;

// Staged execution
pub mod staging;

// Privilege escalation
pub mod escalate;

// Process handoff
pub mod exec;

// Entry wiring shared by the apprun/bypass_noexec binaries.
pub mod cli;

// Shared error types
pub mod types;

// Re-export commonly used types for convenience
pub use types::{LauncherError, Result};
