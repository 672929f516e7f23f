//! Filesystem Backend
//!
//! Stores one file per key under a cache directory. This is the durable
//! backend: entries written through it survive process restarts.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::storage::StorageBackend;

/// Suffix appended to every entry file.
const FILE_SUFFIX: &str = ".json";

/// Distinguishes in-flight temp files across concurrent writes.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

// == Filesystem Backend ==
/// File-per-key storage under a single directory.
///
/// Keys are percent-encoded into filenames, so arbitrary key strings are
/// safe on disk and `list` can recover them exactly.
#[derive(Debug, Clone)]
pub struct FsBackend {
    /// Directory holding one file per cached key
    dir: PathBuf,
}

impl FsBackend {
    // == Constructor ==
    /// Opens a backend rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// Returns the path of the file holding `key`'s entry.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut name = urlencoding::encode(key).into_owned();
        name.push_str(FILE_SUFFIX);
        self.dir.join(name)
    }

    /// Returns a fresh temp path in the cache directory.
    ///
    /// Temp names never carry the entry suffix, so `list` skips any stray
    /// temp file left behind by an abandoned write.
    fn tmp_path(&self) -> PathBuf {
        let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(".write-{}-{}.tmp", std::process::id(), n))
    }
}

#[async_trait]
impl StorageBackend for FsBackend {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        // Write to a temp file, then rename over the entry file. The rename
        // replaces the entry wholesale, so a concurrent read sees either the
        // old bytes or the new ones, and a write abandoned mid-flight leaves
        // only a stray temp file, never a torn entry.
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, self.path_for(key)).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(encoded) = name.strip_suffix(FILE_SUFFIX) else {
                continue;
            };
            // Reverse the percent-encoding applied in path_for
            if let Ok(key) = urlencoding::decode(encoded) {
                keys.push(key.into_owned());
            }
        }

        Ok(keys)
    }
}
