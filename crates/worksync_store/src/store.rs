//! File-backed workspace store.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use worksync_model::Workspace;

/// Extension appended to the workspace path for the temporary save file.
const TEMP_SUFFIX: &str = "tmp";

/// The local workspace store.
///
/// All operations touch exactly one file path (plus a temporary sibling
/// during [`save`](Self::save)). The store never caches the document in
/// memory: the file is the single source of truth between pull and push.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use worksync_store::LocalWorkspaceStore;
///
/// let store = LocalWorkspaceStore::new(Path::new("/var/lib/worksync/workspace.json"));
/// let workspace = store.load()?;
/// # Ok::<(), worksync_store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LocalWorkspaceStore {
    path: PathBuf,
}

impl LocalWorkspaceStore {
    /// Creates a store bound to the given workspace file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the workspace file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the workspace document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file is absent,
    /// [`StoreError::Parse`] if it does not deserialize, or
    /// [`StoreError::Io`] on other read failures.
    pub fn load(&self) -> StoreResult<Workspace> {
        let bytes = fs::read(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                StoreError::Io(e)
            }
        })?;

        Workspace::from_json(&bytes).map_err(|source| StoreError::Parse { source })
    }

    /// Saves the workspace document atomically.
    ///
    /// Uses the write-then-rename pattern so a concurrent reader never sees
    /// a partially written file:
    /// 1. Write pretty JSON to a temporary sibling file
    /// 2. Sync the temporary file to disk
    /// 3. Rename it over the workspace file
    ///
    /// Parent directories are created on demand.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails.
    pub fn save(&self, workspace: &Workspace) -> StoreResult<()> {
        let data = workspace
            .to_json_pretty()
            .map_err(|source| StoreError::Parse { source })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Returns the file's modification time without reading its content.
    ///
    /// `Ok(None)` means the file does not exist; the sync engine treats that
    /// as "infinitely old" when deciding whether a pull may overwrite.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be read for any reason other
    /// than the file being absent.
    pub fn modified_at(&self) -> StoreResult<Option<DateTime<Utc>>> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(DateTime::<Utc>::from(meta.modified()?))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Returns true if the workspace file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn temp_path(&self) -> PathBuf {
        match self.path.extension() {
            Some(ext) => {
                let mut ext = ext.to_os_string();
                ext.push(".");
                ext.push(TEMP_SUFFIX);
                self.path.with_extension(ext)
            }
            None => self.path.with_extension(TEMP_SUFFIX),
        }
    }
}
