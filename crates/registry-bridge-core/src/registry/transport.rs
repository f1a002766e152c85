//! Registry transport abstraction

use super::response::RegistryResponse;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// CRUD access to a remote entity registry.
///
/// Implementations hand back the decoded response envelope as is; checking
/// its status is left to the caller.
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Add a new entity
    async fn add_entity(&self, entity: &Value, access_token: &str) -> Result<RegistryResponse>;

    /// Read an entity by registry id
    async fn read_entity(&self, entity_id: &str, access_token: &str) -> Result<RegistryResponse>;

    /// Update an existing entity; the body carries its id
    async fn update_entity(&self, entity: &Value, access_token: &str) -> Result<RegistryResponse>;

    /// Delete an entity by registry id
    async fn delete_entity(&self, entity_id: &str, access_token: &str) -> Result<RegistryResponse>;
}

#[async_trait]
impl<T: RegistryTransport + ?Sized> RegistryTransport for Arc<T> {
    async fn add_entity(&self, entity: &Value, access_token: &str) -> Result<RegistryResponse> {
        (**self).add_entity(entity, access_token).await
    }

    async fn read_entity(&self, entity_id: &str, access_token: &str) -> Result<RegistryResponse> {
        (**self).read_entity(entity_id, access_token).await
    }

    async fn update_entity(&self, entity: &Value, access_token: &str) -> Result<RegistryResponse> {
        (**self).update_entity(entity, access_token).await
    }

    async fn delete_entity(&self, entity_id: &str, access_token: &str) -> Result<RegistryResponse> {
        (**self).delete_entity(entity_id, access_token).await
    }
}
