//! multipass-hosts core library
//!
//! Turns a list of VM instances into a delimited hosts-file block and merges
//! it into existing hosts text, replacing a previous block in place.
//!
//! ## Pipeline
//!
//! 1. [`resolve`] — append one synthetic entity per configured alias.
//! 2. [`render`] — one `<ip> <name>` line per entity, between markers.
//! 3. [`merge`] — replace the old block or append the new one.
//!
//! All three are pure. [`sync`] wires them to a [`HostsStore`] and a
//! [`WritePolicy`] decided by the caller.

pub mod block;
pub mod config;
pub mod domain;
pub mod hosts_file;
pub mod resolve;
pub mod sync;
pub mod telemetry;

pub use block::{find_block, merge, render, END_MARKER, START_MARKER};
pub use config::{default_config_path, AliasConfig, CONFIG_FILE_NAME};
pub use domain::{AliasMap, Entity, HostsError, Result};
pub use hosts_file::{default_hosts_path, FsHostsStore, HostsStore, MemoryHostsStore};
pub use resolve::resolve;
pub use sync::{apply, plan, sync, SyncOutcome, SyncPlan, WritePolicy};
pub use telemetry::init_tracing;
