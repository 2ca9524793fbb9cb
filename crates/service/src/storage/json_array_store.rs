use std::{marker::PhantomData, path::PathBuf, sync::Arc};
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed array store.
///
/// Persists a `Vec<T>` as one pretty-printed JSON array. Nothing is cached
/// between operations: every read goes back to the file, which keeps the
/// file the single source of truth even when something else edits it. A
/// store-wide mutex serializes the load-mutate-save sequence so two
/// concurrent writers cannot lose each other's update.
///
/// The file is never created here; a missing or unreadable file surfaces as
/// `ServiceError::Storage` on use.
pub struct JsonArrayStore<T> {
    file_path: PathBuf,
    write_lock: Mutex<()>,
    _items: PhantomData<fn() -> T>,
}

impl<T> JsonArrayStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self {
            file_path: path.into(),
            write_lock: Mutex::new(()),
            _items: PhantomData,
        })
    }

    /// Read and decode the whole array from disk.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(format!("read {}: {e}", self.file_path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Storage(format!("decode {}: {e}", self.file_path.display())))
    }

    async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        // Pretty output with 2-space indent, matching the hand-edited format
        // the backing file is kept in.
        let data = serde_json::to_vec_pretty(items)
            .map_err(|e| ServiceError::Storage(format!("encode {}: {e}", self.file_path.display())))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", self.file_path.display())))?;
        debug!(path = %self.file_path.display(), count = items.len(), "collection persisted");
        Ok(())
    }

    /// Run a mutation over the decoded array and persist the result.
    ///
    /// The whole load-mutate-save sequence holds the store lock. An error
    /// from the closure aborts before anything is written back, leaving the
    /// file untouched.
    pub async fn mutate<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let out = f(&mut items)?;
        self.save(&items).await?;
        Ok(out)
    }
}
