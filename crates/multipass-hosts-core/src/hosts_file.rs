//! Hosts file storage.
//!
//! [`HostsStore`] is the seam between the sync logic and the filesystem.
//! [`FsHostsStore`] is the real file; [`MemoryHostsStore`] backs tests.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::{HostsError, Result};

/// Read and replace the full text of a hosts file.
pub trait HostsStore {
    /// Where the text lives, for messages.
    fn location(&self) -> String;

    fn read(&self) -> Result<String>;

    fn write(&self, text: &str) -> Result<()>;
}

/// The system hosts file for the current platform.
pub fn default_hosts_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// Hosts file on disk.
#[derive(Debug, Clone)]
pub struct FsHostsStore {
    path: PathBuf,
}

impl FsHostsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_err(&self, source: std::io::Error) -> HostsError {
        HostsError::HostsWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl HostsStore for FsHostsStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| HostsError::HostsRead {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, text: &str) -> Result<()> {
        // Follow symlinks so the link itself survives and the real file changes.
        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        // Atomic write: temp file in the same directory, then rename over.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.write_err(e))?;
        tmp.write_all(text.as_bytes()).map_err(|e| self.write_err(e))?;

        match fs::metadata(&target) {
            Ok(meta) => fs::set_permissions(tmp.path(), meta.permissions()),
            Err(_) => set_new_file_permissions(tmp.path()),
        }
        .map_err(|e| self.write_err(e))?;

        match tmp.persist(&target) {
            Ok(_) => {}
            Err(e) if rename_unsupported(&e.error) => {
                debug!(
                    path = %target.display(),
                    error = %e.error,
                    "rename failed, writing in place"
                );
                fs::write(&target, text).map_err(|e| self.write_err(e))?;
            }
            Err(e) => return Err(self.write_err(e.error)),
        }
        debug!(path = %target.display(), bytes = text.len(), "hosts file written");
        Ok(())
    }
}

/// Renames that fail because the target is a mount point (bind-mounted
/// `/etc/hosts` in containers) or sits on another device.
fn rename_unsupported(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::ResourceBusy | std::io::ErrorKind::CrossesDevices
    )
}

#[cfg(unix)]
fn set_new_file_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_new_file_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// In-memory hosts text, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryHostsStore {
    // (text, successful writes)
    state: Mutex<(String, usize)>,
}

impl MemoryHostsStore {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: Mutex::new((text.into(), 0)),
        }
    }

    /// Current text.
    pub fn text(&self) -> String {
        self.state.lock().map(|s| s.0.clone()).unwrap_or_default()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.state.lock().map(|s| s.1).unwrap_or_default()
    }
}

impl HostsStore for MemoryHostsStore {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn read(&self) -> Result<String> {
        let state = self.state.lock().map_err(|_| poisoned())?;
        Ok(state.0.clone())
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut state = self.state.lock().map_err(|_| poisoned())?;
        state.0 = text.to_string();
        state.1 += 1;
        Ok(())
    }
}

fn poisoned() -> HostsError {
    HostsError::Io(std::io::Error::other("memory hosts store lock poisoned"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fs_store_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts");
        fs::write(&path, "127.0.0.1 localhost\n").unwrap();

        let store = FsHostsStore::new(&path);
        assert_eq!(store.read().unwrap(), "127.0.0.1 localhost\n");

        store.write("127.0.0.1 localhost\n10.0.0.2 vm1\n").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "127.0.0.1 localhost\n10.0.0.2 vm1\n"
        );
    }

    #[test]
    fn test_fs_store_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let store = FsHostsStore::new(dir.path().join("nope"));
        let err = store.read().unwrap_err();
        assert!(matches!(err, HostsError::HostsRead { .. }));
    }

    #[test]
    fn test_fs_store_write_into_missing_dir_is_write_error() {
        let dir = tempdir().unwrap();
        let store = FsHostsStore::new(dir.path().join("missing").join("hosts"));
        let err = store.write("x").unwrap_err();
        assert!(matches!(err, HostsError::HostsWrite { .. }));
    }

    #[test]
    fn test_fs_store_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts");
        let store = FsHostsStore::new(&path);
        store.write("a\n").unwrap();
        store.write("b\n").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_store_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        FsHostsStore::new(&path).write("new\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_store_new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts");
        FsHostsStore::new(&path).write("new\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let store = MemoryHostsStore::new("a\n");
        assert_eq!(store.read().unwrap(), "a\n");
        store.write("b\n").unwrap();
        assert_eq!(store.text(), "b\n");
        assert_eq!(store.writes(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_store_writes_through_symlink() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real_hosts");
        let link = dir.path().join("hosts");
        fs::write(&real, "127.0.0.1 localhost\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        FsHostsStore::new(&link)
            .write("127.0.0.1 localhost\n10.0.0.2 vm1\n")
            .unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_to_string(&real).unwrap(),
            "127.0.0.1 localhost\n10.0.0.2 vm1\n"
        );
    }

    #[test]
    fn test_busy_or_cross_device_rename_falls_back() {
        use std::io::{Error, ErrorKind};

        assert!(rename_unsupported(&Error::from(ErrorKind::ResourceBusy)));
        assert!(rename_unsupported(&Error::from(ErrorKind::CrossesDevices)));
        assert!(!rename_unsupported(&Error::from(ErrorKind::PermissionDenied)));
        assert!(!rename_unsupported(&Error::from(ErrorKind::NotFound)));
    }

    #[test]
    fn test_memory_store_poisoned_lock_is_error() {
        let store = std::sync::Arc::new(MemoryHostsStore::new("a\n"));
        let clone = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = clone.state.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(store.write("b\n"), Err(HostsError::Io(_))));
        assert!(matches!(store.read(), Err(HostsError::Io(_))));
    }
}
