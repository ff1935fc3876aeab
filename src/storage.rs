use std::collections::HashMap;
use std::path::PathBuf;
use parking_lot::Mutex;
use crate::error::MarombaError;

/// Whole-value string key-value store, the only persistence surface the
/// training core talks to. Reads and writes are read-modify-write-whole;
/// callers serialize their own payloads.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), MarombaError>;
    fn remove(&self, key: &str);
}

pub(crate) fn data_dir() -> PathBuf {
    // Use platform-specific app data directory
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support/com.maromba.app");
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push("com.maromba.app");
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share/com.maromba.app");
            return dir;
        }
    }

    // Fallback
    PathBuf::from("data")
}

/// File-backed store: each key becomes one JSON file under the app data
/// directory. The file is the localStorage analogue, not a database.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        FileStore { dir: data_dir() }
    }

    /// Store rooted at an explicit directory (tests, portable installs).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Failed to read store file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MarombaError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| MarombaError::new(
                format!("Failed to create store directory: {}", e),
                "io"
            ).with_context(format!("path: {:?}", self.dir)))?;

        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| MarombaError::new(
                format!("Failed to write store file: {}", e),
                "io"
            ).with_context(format!("path: {:?}", path)))?;

        Ok(())
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = std::fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = ?path, error = %e, "Failed to remove store file");
            }
        }
    }
}

/// In-memory store for tests and ephemeral embedding.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MarombaError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.lock().remove(key);
    }
}
