//! Durable storage for shop credentials.
//!
//! The SDK only consumes the [`CredentialStore`] trait. Two implementations
//! ship with the crate:
//!
//! - [`FileCredentialStore`]: one JSON file per shop under a directory, with a
//!   `default.json` fallback for stores created without a shop id
//! - [`MemoryCredentialStore`]: process-local storage, mostly for tests
//!
//! Writes are last-write-wins; concurrent `store` calls for the same shop
//! leave whichever credential was written last.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::auth::Credential;

/// Errors raised by credential stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("Credential storage I/O failed for '{path}': {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A stored record could not be (de)serialized.
    #[error("Credential record is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other backend-specific failure.
    #[error("Credential store failure: {0}")]
    Backend(String),
}

/// Storage for the credential of one shop or merchant account.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the stored credential, if any.
    async fn get(&self) -> Result<Option<Credential>, StoreError>;

    /// Replaces the stored credential.
    async fn store(&self, credential: &Credential) -> Result<(), StoreError>;

    /// Removes the stored credential. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// File name used when a store is not bound to a shop.
pub const DEFAULT_CREDENTIAL_FILE: &str = "default.json";

/// Distinguishes temp files of concurrent writes within this process.
static WRITE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Stores credentials as JSON files, one per shop.
///
/// ```rust,ignore
/// use shopee_sdk::auth::{CredentialStore, FileCredentialStore};
///
/// let store = FileCredentialStore::new(".token", Some(123456));
/// if let Some(credential) = store.get().await? {
///     println!("token expires at {:?}", credential.expired_at);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct FileCredentialStore {
    directory: PathBuf,
    shop_id: Option<u64>,
}

impl FileCredentialStore {
    /// Creates a store rooted at `directory`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, shop_id: Option<u64>) -> Self {
        Self {
            directory: directory.into(),
            shop_id,
        }
    }

    /// Returns the file this store writes to.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.shop_id.map_or_else(
            || self.default_path(),
            |shop_id| self.directory.join(format!("token_{shop_id}.json")),
        )
    }

    fn default_path(&self) -> PathBuf {
        self.directory.join(DEFAULT_CREDENTIAL_FILE)
    }

    fn temp_path(path: &Path) -> PathBuf {
        let sequence = WRITE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{}.{sequence}.tmp", std::process::id()));
        path.with_file_name(name)
    }

    async fn read(path: &Path) -> Result<Option<Credential>, StoreError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> Result<Option<Credential>, StoreError> {
        let path = self.path();
        if let Some(credential) = Self::read(&path).await? {
            return Ok(Some(credential));
        }

        let fallback = self.default_path();
        if fallback == path {
            return Ok(None);
        }
        tracing::debug!("No credential at {}, trying {}", path.display(), fallback.display());
        Self::read(&fallback).await
    }

    async fn store(&self, credential: &Credential) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| StoreError::Io {
                path: self.directory.clone(),
                source,
            })?;

        // Write a sibling temp file and rename it over the target so readers
        // only ever see a complete record.
        let path = self.path();
        let json = serde_json::to_vec_pretty(credential)?;
        let tmp_path = Self::temp_path(&path);
        if let Err(source) = tokio::fs::write(&tmp_path, json).await {
            return Err(StoreError::Io {
                path: tmp_path,
                source,
            });
        }
        if let Err(source) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io { path, source });
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let path = self.path();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

/// Keeps the credential in memory.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `credential`.
    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Result<Option<Credential>, StoreError> {
        Ok(self.credential.read().await.clone())
    }

    async fn store(&self, credential: &Credential) -> Result<(), StoreError> {
        *self.credential.write().await = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.credential.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_follow_shop_id() {
        let with_shop = FileCredentialStore::new("/tmp/tokens", Some(99));
        assert_eq!(with_shop.path(), PathBuf::from("/tmp/tokens/token_99.json"));

        let default = FileCredentialStore::new("/tmp/tokens", None);
        assert_eq!(default.path(), PathBuf::from("/tmp/tokens/default.json"));
    }

    #[tokio::test]
    async fn test_file_store_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested"), Some(5));

        assert!(store.get().await.unwrap().is_none());

        let credential = Credential::new("access", "refresh", Some(5), None);
        store.store(&credential).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(credential));

        store.clear().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_file_store_reads_never_see_partial_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FileCredentialStore::new(dir.path(), Some(7)));
        store
            .store(&Credential::new("initial", "r", Some(7), None))
            .await
            .unwrap();

        let writers: Vec<_> = (0..500)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let credential = Credential::new(format!("access-{i}"), "r", Some(7), None);
                    store.store(&credential).await.unwrap();
                })
            })
            .collect();

        let reader = {
            let store = store.clone();
            tokio::spawn(async move {
                let mut errors = 0;
                for _ in 0..2000 {
                    match store.get().await {
                        Ok(Some(_)) => {}
                        Ok(None) | Err(_) => errors += 1,
                    }
                    tokio::task::yield_now().await;
                }
                errors
            })
        };

        for writer in writers {
            writer.await.unwrap();
        }
        assert_eq!(reader.await.unwrap(), 0);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_falls_back_to_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let default_store = FileCredentialStore::new(dir.path(), None);
        let fallback = Credential::new("default-access", "default-refresh", None, None);
        default_store.store(&fallback).await.unwrap();

        let shop_store = FileCredentialStore::new(dir.path(), Some(7));
        assert_eq!(shop_store.get().await.unwrap(), Some(fallback));

        let own = Credential::new("shop-access", "shop-refresh", Some(7), None);
        shop_store.store(&own).await.unwrap();
        assert_eq!(shop_store.get().await.unwrap(), Some(own));
    }

    #[tokio::test]
    async fn test_file_store_reports_malformed_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path(), Some(1));
        tokio::fs::write(store.path(), b"not json").await.unwrap();

        assert!(matches!(
            store.get().await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_store_last_write_wins() {
        let store = MemoryCredentialStore::new();
        store
            .store(&Credential::new("first", "r1", None, None))
            .await
            .unwrap();
        store
            .store(&Credential::new("second", "r2", None, None))
            .await
            .unwrap();

        assert_eq!(store.get().await.unwrap().unwrap().access_token, "second");
        store.clear().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
    }
}
