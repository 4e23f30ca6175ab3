//! JSON file store for the catalog.
//!
//! # Storage
//!
//! The whole catalog lives in one JSON file (see [`records::StoreData`]). It is
//! loaded into memory once by [`JsonStore::open`] and rewritten in full after
//! every mutation.
//!
//! # Concurrency
//!
//! A single `RwLock` guards the in-memory copy. Readers share it; writers hold
//! the write lock across mutate, persist and swap, so one writer runs at a
//! time and a failed write leaves both the file and memory unchanged.

pub mod categories;
pub mod products;
pub mod records;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard};

pub use categories::CategoryRepository;
pub use products::ProductRepository;
pub use records::StoreData;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the data file failed.
    #[error("Data file error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file exists but does not hold a valid catalog.
    #[error("Data corruption: {0}")]
    DataCorruption(String),

    /// The catalog could not be serialized for writing.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A unique value is already taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The largest stored id leaves no room for another.
    #[error("No {0} ids left")]
    IdsExhausted(&'static str),
}

/// The catalog loaded from a JSON file.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl JsonStore {
    /// Open the data file, creating it with the seed catalog if missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file or its directory cannot be
    /// created or read.
    /// Returns `RepositoryError::DataCorruption` if the file is not valid.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        if write_seed(&path, false).await? {
            tracing::info!(path = %path.display(), "Created data file with seed catalog");
        }

        let bytes = tokio::fs::read(&path).await?;
        let data: StoreData = serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid data file {}: {e}", path.display()))
        })?;

        tracing::info!(
            path = %path.display(),
            products = data.products.len(),
            categories = data.categories.len(),
            "Catalog loaded"
        );

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared read access to the catalog.
    pub async fn read(&self) -> RwLockReadGuard<'_, StoreData> {
        self.data.read().await
    }

    /// Apply a mutation and persist it.
    ///
    /// `mutate` runs on a copy of the catalog. The copy is written to disk
    /// and only then replaces the in-memory catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the file cannot be written; the catalog
    /// is left unchanged.
    pub async fn write<T>(
        &self,
        mutate: impl FnOnce(&mut StoreData) -> T,
    ) -> Result<T, RepositoryError> {
        let mut guard = self.data.write().await;

        let mut next = guard.clone();
        let result = mutate(&mut next);
        persist(&self.path, &next).await?;
        *guard = next;

        Ok(result)
    }

    /// Like [`Self::write`], but `mutate` may reject the change.
    ///
    /// Nothing is persisted when `mutate` returns `Err`. The check and the
    /// change run under the same write lock.
    ///
    /// # Errors
    ///
    /// Returns the error from `mutate`, or a `RepositoryError` if the file
    /// cannot be written.
    pub async fn try_write<T, E>(
        &self,
        mutate: impl FnOnce(&mut StoreData) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<RepositoryError>,
    {
        let mut guard = self.data.write().await;

        let mut next = guard.clone();
        let result = mutate(&mut next)?;
        persist(&self.path, &next).await.map_err(E::from)?;
        *guard = next;

        Ok(result)
    }

    /// Whether the backing file can currently be read.
    pub async fn is_readable(&self) -> bool {
        tokio::fs::File::open(&self.path).await.is_ok()
    }
}

/// Write the seed catalog to `path`.
///
/// Existing files are left alone unless `overwrite` is set. Returns whether
/// the file was written.
///
/// # Errors
///
/// Returns `RepositoryError` if the directory or file cannot be written.
pub async fn write_seed(path: &Path, overwrite: bool) -> Result<bool, RepositoryError> {
    if !overwrite && tokio::fs::try_exists(path).await? {
        return Ok(false);
    }

    persist(path, &StoreData::seed()).await?;
    Ok(true)
}

async fn persist(path: &Path, data: &StoreData) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_vec_pretty(data)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::testing::{seeded_store, temp_data_file};
    use super::*;

    #[tokio::test]
    async fn test_try_write_rejection_leaves_catalog_alone() {
        let store = seeded_store().await;

        let err = store
            .try_write(|data| {
                data.categories.clear();
                Err::<(), _>(RepositoryError::Conflict("nope".to_string()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(store.read().await.categories.len(), 3);

        let reopened = JsonStore::open(store.path()).await.unwrap();
        assert_eq!(reopened.read().await.categories.len(), 3);
    }

    #[tokio::test]
    async fn test_open_creates_seed_file() {
        let path = temp_data_file();
        let store = JsonStore::open(&path).await.unwrap();

        assert!(tokio::fs::try_exists(&path).await.unwrap());
        let data = store.read().await;
        assert_eq!(data.categories.len(), 3);
        assert_eq!(data.products.len(), 1);
        assert_eq!(data.products[0].name, "Smartphone");
    }

    #[tokio::test]
    async fn test_open_keeps_existing_file() {
        let path = temp_data_file();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, r#"{"Products":[],"Categories":[{"Id":9,"Name":"Libros"}]}"#)
            .await
            .unwrap();

        let store = JsonStore::open(&path).await.unwrap();
        let data = store.read().await;
        assert!(data.products.is_empty());
        assert_eq!(data.categories[0].id, 9);
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_file() {
        let path = temp_data_file();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "not json").await.unwrap();

        let err = JsonStore::open(&path).await.unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[tokio::test]
    async fn test_write_persists_before_swapping() {
        let path = temp_data_file();
        let store = JsonStore::open(&path).await.unwrap();

        let count = store
            .write(|data| {
                data.categories.push(records::CategoryRecord {
                    id: 4,
                    name: "Libros".to_string(),
                });
                data.categories.len()
            })
            .await
            .unwrap();
        assert_eq!(count, 4);

        let reopened = JsonStore::open(&path).await.unwrap();
        assert_eq!(reopened.read().await.categories.len(), 4);
    }

    #[tokio::test]
    async fn test_write_seed_respects_overwrite() {
        let path = temp_data_file();
        assert!(write_seed(&path, false).await.unwrap());
        assert!(!write_seed(&path, false).await.unwrap());
        assert!(write_seed(&path, true).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_readable() {
        let path = temp_data_file();
        let store = JsonStore::open(&path).await.unwrap();
        assert!(store.is_readable().await);

        tokio::fs::remove_file(&path).await.unwrap();
        assert!(!store.is_readable().await);
    }
}
