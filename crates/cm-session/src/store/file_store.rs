use crate::store::{DurableStore, StoreError, StoreKey, StoreResult};

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use log::{debug, info, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Store backed by a single JSON document on disk.
///
/// The document is read once on [`FileStore::open`] and rewritten in full on
/// every mutation using the temp file + fsync + rename pattern, so a crash
/// mid-write leaves either the old or the new document, never a torn one.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a valid document
    /// is moved aside to `<path>.corrupted.<timestamp>` and the store starts
    /// empty.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = Self::load(&path)?;

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> StoreResult<BTreeMap<String, String>> {
        if !path.exists() {
            info!("No session store at {path:?} (first launch)");
            return Ok(BTreeMap::new());
        }

        let contents =
            fs::read_to_string(path).map_err(|e| StoreError::file_read(path.to_path_buf(), e))?;

        match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
            Ok(mut entries) => {
                // Keys we do not own are dropped on the next write.
                entries.retain(|k, _| StoreKey::parse(k).is_some());
                debug!("Loaded session store at {path:?} ({} keys)", entries.len());
                Ok(entries)
            }
            Err(e) => {
                warn!("Session store corrupted at {path:?}: {e}");
                Self::backup_corrupted(path)?;
                Ok(BTreeMap::new())
            }
        }
    }

    /// Renames a corrupted document to `<path>.corrupted.<timestamp>`.
    fn backup_corrupted(path: &Path) -> StoreResult<PathBuf> {
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = Self::sibling(path, &format!(".corrupted.{timestamp}"));

        fs::rename(path, &backup_path)
            .map_err(|e| StoreError::backup_failed(path.to_path_buf(), e))?;

        warn!("Backed up corrupted session store to {backup_path:?}");
        Ok(backup_path)
    }

    fn sibling(path: &Path, suffix: &str) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| StoreError::dir_creation(dir.to_path_buf(), e))?;
        }

        let temp_path = Self::sibling(&self.path, &format!(".tmp.{}", std::process::id()));
        let json = serde_json::to_string_pretty(entries)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StoreError::atomic_rename(temp_path, self.path.clone(), e)
        })?;

        Ok(())
    }

    /// Applies `change` to a copy of the entries, persists it, and only then
    /// swaps it in. A failed write leaves memory untouched.
    fn mutate<F>(&self, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut guard = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let mut next = guard.clone();

        if !change(&mut next) {
            return Ok(());
        }

        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: StoreKey) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key.as_str())
            .cloned()
    }

    fn set(&self, key: StoreKey, value: &str) -> StoreResult<()> {
        self.mutate(|entries| {
            let previous = entries.insert(key.as_str().to_string(), value.to_string());
            previous.as_deref() != Some(value)
        })
    }

    fn remove(&self, key: StoreKey) -> StoreResult<()> {
        self.mutate(|entries| entries.remove(key.as_str()).is_some())
    }
}
