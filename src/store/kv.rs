use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;

/// Error type for key-value persistence operations
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not create lock file at {path}: {source}")]
    LockCreate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another tick process may be writing")]
    LockTimeout { path: PathBuf },
}

/// A string key-value persistence service.
///
/// This is the injection seam for the stores: production code uses
/// [`FileKv`], tests substitute an in-memory double. `lock_exclusive`
/// returns a guard held across a whole read-modify-write so two processes
/// cannot interleave one.
pub trait KeyValue {
    type Guard;

    /// Read the value for a key, or `None` if nothing is stored yet.
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Store a value for a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// Take an exclusive cross-process lock over the whole store.
    fn lock_exclusive(&self) -> Result<Self::Guard, KvError>;
}

/// File-backed key-value store: one file per key in a data directory.
///
/// Writes go through a temp file + rename so a crashed write never leaves
/// a truncated payload behind.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self, KvError> {
        fs::create_dir_all(dir).map_err(|e| KvError::Write {
            path: dir.to_path_buf(),
            source: e,
        })?;
        Ok(FileKv {
            dir: dir.to_path_buf(),
        })
    }

    /// The data directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file backing a given key.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValue for FileKv {
    type Guard = FileLock;

    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvError::Read { path, source: e }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let path = self.key_path(key);
        atomic_write(&path, value.as_bytes()).map_err(|e| KvError::Write { path, source: e })
    }

    fn lock_exclusive(&self) -> Result<FileLock, KvError> {
        FileLock::acquire(&self.dir, Duration::from_secs(5))
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Advisory file lock serializing writes to the data directory.
///
/// Uses platform-native flock (Unix) to coordinate between the TUI and
/// CLI processes. Released on drop.
pub struct FileLock {
    _file: File,
}

impl FileLock {
    /// Acquire an advisory lock on the data directory.
    /// Blocks up to `timeout` waiting for the lock.
    fn acquire(dir: &Path, timeout: Duration) -> Result<Self, KvError> {
        let lock_path = dir.join(".lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| KvError::LockCreate {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            match try_lock(&file) {
                Ok(()) => return Ok(FileLock { _file: file }),
                Err(_) if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(_) => return Err(KvError::LockTimeout { path: lock_path }),
            }
        }
    }
}

/// Try to acquire an exclusive flock on the file (non-blocking)
#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let fd = file.as_raw_fd();
    let result = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    // On non-Unix platforms, just succeed (advisory locking)
    Ok(())
}
