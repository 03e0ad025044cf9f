//! Flat-file storage layer
//!
//! One JSON file per entity type holding the full current collection as a
//! pretty-printed array of records. Every read-modify-write cycle runs
//! under the store's exclusive lock so concurrent callers cannot
//! interleave and silently drop each other's updates.
//!
//! # Durability
//!
//! `write_all` serializes into a temporary file in the data directory and
//! atomically renames it over the target, so a crash mid-write never
//! leaves a truncated or half-written file behind.

use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record file {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to encode records: {0}")]
    Encode(serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Record collection persisted in a single JSON file.
pub struct RecordStore<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<T>,
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a store backed by `<data_dir>/<file_name>`.
    ///
    /// The data directory is created if missing; the file itself is only
    /// created on the first write.
    pub fn open(data_dir: impl AsRef<Path>, file_name: &str) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(file_name),
            lock: Mutex::new(()),
            _marker: PhantomData,
        })
    }

    /// Read the full collection. An absent or empty file yields an empty
    /// collection; malformed content is a fatal decode error.
    pub fn read_all(&self) -> StoreResult<Vec<T>> {
        let _guard = self.lock.lock();
        self.load()
    }

    /// Replace the full collection.
    pub fn write_all(&self, records: &[T]) -> StoreResult<()> {
        let _guard = self.lock.lock();
        self.save(records)
    }

    /// Run a read-modify-write cycle as one exclusive critical section.
    ///
    /// Loads the collection, applies `f`, and writes the result back. If
    /// `f` returns an error nothing is written, so a multi-record mutation
    /// is all-or-nothing with respect to the file.
    pub fn update<R, E>(&self, f: impl FnOnce(&mut Vec<T>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.lock.lock();
        let mut records = self.load()?;
        let out = f(&mut records)?;
        self.save(&records)?;
        Ok(out)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<Vec<T>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(records).map_err(StoreError::Encode)?;

        // Temp file must live in the same directory as the target for the
        // rename to be atomic (same filesystem).
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}
