//! A single JSON-array-backed collection.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors raised by the record store.
///
/// Callers can distinguish an I/O failure from a store file that exists
/// but does not parse as a JSON array of records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but its contents are not valid records.
    #[error("malformed store file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One persisted collection: a flat JSON array of `T` in insertion order.
///
/// Every mutation is a whole-file read-modify-write, serialized by a
/// per-collection mutex so concurrent appends cannot lose records. The
/// rewritten file is first written to a sibling temp file and then renamed
/// over the store, so readers observe either the old or the new array,
/// never a torn write.
pub struct JsonCollection<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a handle for the collection backed by `path`.
    ///
    /// The file itself is created lazily on first mutation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file currently exists.
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Create the backing file as an empty array if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be created.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        if !self.exists().await {
            self.replace(b"[]").await?;
        }
        Ok(())
    }

    /// Read the whole collection.
    ///
    /// An absent or empty backing file yields an empty vec, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read, or
    /// `StoreError::Malformed` if it exists but does not parse.
    pub async fn read_all(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Append one record, creating the backing file if necessary.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` on read/write failure, or
    /// `StoreError::Malformed` if the existing file does not parse.
    pub async fn append(&self, record: T) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_all().await?;
        records.push(record);

        let json = serde_json::to_vec_pretty(&records).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            source: e,
        })?;
        self.replace(&json).await
    }

    /// Atomically replace the backing file with `contents`.
    ///
    /// Must be called with the write lock held.
    async fn replace(&self, contents: &[u8]) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("tmp");

        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|e| StoreError::Io {
                path: tmp.clone(),
                source: e,
            })?;

        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Io {
                path: self.path.clone(),
                source: e,
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn collection(dir: &tempfile::TempDir, name: &str) -> JsonCollection<String> {
        JsonCollection::new(dir.path().join(name))
    }

    #[tokio::test]
    async fn test_read_all_absent_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records = collection(&dir, "absent.json").read_all().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_read_all_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        tokio::fs::write(&path, "").await.unwrap();

        let records = JsonCollection::<String>::new(path).read_all().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_ensure_exists_creates_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let coll = collection(&dir, "new.json");

        assert!(!coll.exists().await);
        coll.ensure_exists().await.unwrap();
        assert!(coll.exists().await);

        let raw = tokio::fs::read_to_string(coll.path()).await.unwrap();
        assert_eq!(raw, "[]");
    }

    #[tokio::test]
    async fn test_append_creates_file_and_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let coll = collection(&dir, "records.json");

        coll.append("first".to_owned()).await.unwrap();
        coll.append("second".to_owned()).await.unwrap();
        coll.append("third".to_owned()).await.unwrap();

        let records = coll.read_all().await.unwrap();
        assert_eq!(records, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_append_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let coll = collection(&dir, "records.json");
        coll.append("only".to_owned()).await.unwrap();

        assert!(!tokio::fs::try_exists(dir.path().join("records.tmp"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_read_all_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, "{not an array").await.unwrap();

        let err = JsonCollection::<String>::new(path)
            .read_all()
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_appends_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let coll = Arc::new(collection(&dir, "records.json"));

        let mut handles = Vec::new();
        for i in 0..16 {
            let coll = Arc::clone(&coll);
            handles.push(tokio::spawn(async move {
                coll.append(format!("record-{i}")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let records = coll.read_all().await.unwrap();
        assert_eq!(records.len(), 16);
    }
}
