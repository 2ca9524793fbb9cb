use std::sync::Arc;

use serde_json::Value;

use crate::cafe::{is_falsy, Cafe};
use crate::errors::ServiceError;
use crate::storage::json_array_store::JsonArrayStore;

/// Storage capability the HTTP layer depends on.
///
/// Path ids arrive as strings and are matched loosely against stored ids.
/// Mutating operations return the full updated collection because the HTTP
/// contract echoes it back to the client.
#[async_trait::async_trait]
pub trait CafeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Cafe>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Cafe, ServiceError>;
    async fn create(&self, cafe: Cafe) -> Result<Vec<Cafe>, ServiceError>;
    async fn update(&self, id: &str, cafe: Cafe) -> Result<Vec<Cafe>, ServiceError>;
    async fn delete(&self, id: &str) -> Result<Vec<Cafe>, ServiceError>;
}

/// File-backed store: one JSON array on disk, re-read on every operation.
pub struct CafeStore {
    store: Arc<JsonArrayStore<Cafe>>,
}

impl CafeStore {
    pub fn new<P: Into<std::path::PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonArrayStore::new(path) })
    }
}

#[async_trait::async_trait]
impl CafeRepository for CafeStore {
    /// Full ordered collection.
    async fn list(&self) -> Result<Vec<Cafe>, ServiceError> {
        self.store.load().await
    }

    /// First record whose id loosely matches; linear scan.
    async fn get(&self, id: &str) -> Result<Cafe, ServiceError> {
        let wanted = Value::String(id.to_string());
        let cafes = self.store.load().await?;
        cafes
            .into_iter()
            .find(|c| c.matches_id(&wanted))
            .ok_or(ServiceError::NotFound)
    }

    /// Append the record, rejecting a missing/falsy id or a duplicate one.
    async fn create(&self, cafe: Cafe) -> Result<Vec<Cafe>, ServiceError> {
        let id = match cafe.id() {
            Some(v) if !is_falsy(v) => v.clone(),
            _ => return Err(ServiceError::MissingId),
        };
        self.store
            .mutate(move |cafes| {
                if cafes.iter().any(|c| c.matches_id(&id)) {
                    return Err(ServiceError::DuplicateId);
                }
                cafes.push(cafe);
                Ok(cafes.clone())
            })
            .await
    }

    /// Replace the matching record in place, keeping its position.
    ///
    /// A body whose id does not loosely match the path id is rejected before
    /// touching the file; this also covers a body with no id at all.
    async fn update(&self, id: &str, cafe: Cafe) -> Result<Vec<Cafe>, ServiceError> {
        let wanted = Value::String(id.to_string());
        if !cafe.matches_id(&wanted) {
            return Err(ServiceError::IdMismatch);
        }
        self.store
            .mutate(move |cafes| {
                match cafes.iter().position(|c| c.matches_id(&wanted)) {
                    Some(idx) => {
                        cafes[idx] = cafe;
                        Ok(cafes.clone())
                    }
                    None => Err(ServiceError::NotFound),
                }
            })
            .await
    }

    /// Remove the matching record; a second delete of the same id is NotFound.
    async fn delete(&self, id: &str) -> Result<Vec<Cafe>, ServiceError> {
        let wanted = Value::String(id.to_string());
        self.store
            .mutate(move |cafes| {
                match cafes.iter().position(|c| c.matches_id(&wanted)) {
                    Some(idx) => {
                        cafes.remove(idx);
                        Ok(cafes.clone())
                    }
                    None => Err(ServiceError::NotFound),
                }
            })
            .await
    }
}
