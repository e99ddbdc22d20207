use crate::error::AppError;
use fs2::FileExt;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Raw document storage for one persisted collection.
///
/// A mutation must hold the [`BackendLock`] for its whole read-modify-write cycle.
pub trait StorageBackend: Send + Sync + fmt::Debug {
    /// Current contents, `None` if nothing has been written yet
    fn read(&self) -> Result<Option<String>, AppError>;

    /// Replace the contents atomically
    fn write(&self, contents: &str) -> Result<(), AppError>;

    /// Exclusive lock scoped to one mutation
    fn lock(&self) -> Result<BackendLock<'_>, AppError>;
}

/// Guard returned by [`StorageBackend::lock`]; released on drop
pub struct BackendLock<'a> {
    inner: LockInner<'a>,
}

enum LockInner<'a> {
    File { file: File, path: PathBuf },
    Memory(#[allow(dead_code)] MutexGuard<'a, ()>),
}

impl Drop for BackendLock<'_> {
    fn drop(&mut self) {
        if let LockInner::File { file, path } = &self.inner {
            if let Err(e) = FileExt::unlock(file) {
                warn!("Failed to unlock {:?}: {}", path, e);
            }
        }
    }
}

/// JSON file on disk, guarded by an fs2 lock on a sibling `.lock` file.
///
/// Writes go to a temporary file in the same directory which is then renamed over the
/// target, so readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);
        Self { path, lock_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::Persistence(format!("Failed to create directory {:?}: {}", parent, e))
                })?;
            }
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string());
        self.path
            .with_file_name(format!(".{}.tmp-{}", name, std::process::id()))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Persistence(format!(
                "Failed to read {:?}: {}",
                self.path, e
            ))),
        }
    }

    fn write(&self, contents: &str) -> Result<(), AppError> {
        self.ensure_parent()?;
        let temp_path = self.temp_path();

        let result = (|| -> std::io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(AppError::Persistence(format!(
                "Failed to write {:?}: {}",
                self.path, e
            )));
        }

        debug!(path = ?self.path, bytes = contents.len(), "Store written");
        Ok(())
    }

    fn lock(&self) -> Result<BackendLock<'_>, AppError> {
        self.ensure_parent()?;

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| {
                AppError::Persistence(format!("Failed to open lock file {:?}: {}", self.lock_path, e))
            })?;

        file.lock_exclusive().map_err(|e| {
            AppError::Persistence(format!("Failed to lock {:?}: {}", self.lock_path, e))
        })?;

        Ok(BackendLock {
            inner: LockInner::File {
                file,
                path: self.lock_path.clone(),
            },
        })
    }
}

/// In-process storage for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: Mutex<Option<String>>,
    lock: Mutex<()>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, AppError> {
        let contents = self
            .contents
            .lock()
            .map_err(|_| AppError::Persistence("memory store poisoned".to_string()))?;
        Ok(contents.clone())
    }

    fn write(&self, contents: &str) -> Result<(), AppError> {
        let mut slot = self
            .contents
            .lock()
            .map_err(|_| AppError::Persistence("memory store poisoned".to_string()))?;
        *slot = Some(contents.to_string());
        Ok(())
    }

    fn lock(&self) -> Result<BackendLock<'_>, AppError> {
        let guard = self
            .lock
            .lock()
            .map_err(|_| AppError::Persistence("memory store lock poisoned".to_string()))?;
        Ok(BackendLock {
            inner: LockInner::Memory(guard),
        })
    }
}
