//! Running the `multipass` binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::list::{parse_list, Instance};
use crate::{MultipassError, Result};

/// Default binary name looked up on PATH.
pub const MULTIPASS_BINARY: &str = "multipass";

/// Default bound on a single external command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can report the current instances.
#[async_trait]
pub trait InstanceSource: Send + Sync {
    async fn list_instances(&self) -> Result<Vec<Instance>>;
}

/// Lists instances by running `multipass list --format json`.
#[derive(Debug, Clone)]
pub struct MultipassCli {
    binary: String,
    timeout: Duration,
}

impl Default for MultipassCli {
    fn default() -> Self {
        Self::new(MULTIPASS_BINARY)
    }
}

impl MultipassCli {
    /// `binary` is a bare name searched on PATH, or a path to the executable.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Whether the binary can be found at all.
    pub fn is_available(&self) -> bool {
        find_in_path(&self.binary).is_some()
    }
}

#[async_trait]
impl InstanceSource for MultipassCli {
    async fn list_instances(&self) -> Result<Vec<Instance>> {
        let program = find_in_path(&self.binary).ok_or_else(|| MultipassError::NotInstalled {
            binary: self.binary.clone(),
        })?;

        let stdout = run_command(&program, &["list", "--format", "json"], self.timeout).await?;
        let instances = parse_list(&stdout)?;
        debug!(count = instances.len(), "multipass reported instances");
        Ok(instances)
    }
}

/// Locate an executable the way a shell would.
///
/// A name containing a path separator is checked as-is; a bare name is
/// searched in each `PATH` entry.
pub fn find_in_path(binary: &str) -> Option<PathBuf> {
    let candidate = Path::new(binary);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| {
        let full = dir.join(binary);
        if is_executable(&full) {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = full.with_extension("exe");
            if is_executable(&exe) {
                return Some(exe);
            }
        }
        None
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Run `program args...`, returning stdout on success.
///
/// The child is killed if it does not finish within `timeout`.
pub async fn run_command(program: &Path, args: &[&str], timeout: Duration) -> Result<Vec<u8>> {
    let command = describe(program, args);
    debug!(%command, "running");

    let child = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(timeout, child)
        .await
        .map_err(|_| MultipassError::Timeout {
            command: command.clone(),
            timeout,
        })??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(MultipassError::CommandFailed { command, stderr });
    }

    Ok(output.stdout)
}

fn describe(program: &Path, args: &[&str]) -> String {
    let name = program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string());
    std::iter::once(name)
        .chain(args.iter().map(|a| a.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}
