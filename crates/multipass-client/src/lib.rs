//! multipass-client: the outside world for multipass-hosts
//!
//! Runs `multipass list --format json` and turns the result into core
//! entities, and probes macOS System Integrity Protection so the caller can
//! decide whether the hosts file may be written.

pub mod cli;
pub mod error;
pub mod list;
pub mod sip;

pub use cli::{find_in_path, InstanceSource, MultipassCli, DEFAULT_TIMEOUT, MULTIPASS_BINARY};
pub use error::{MultipassError, Result};
pub use list::{parse_list, to_entities, Instance, ListOutput};
pub use sip::integrity_protection_enabled;
