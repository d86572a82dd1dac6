//! REST collection client
//!
//! One `ResourceClient<E>` per entity kind. Every call is a single request:
//! no retries, no caching.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use shared::{Entity, types::EntityId};

use crate::{ClientResult, HttpClient, NetworkHttpClient};

/// Health endpoint, relative to the API base URL
pub const HEALTH_PATH: &str = "health";

/// Operations the panels need from a REST collection
#[async_trait]
pub trait ResourceApi<E: Entity>: Send + Sync {
    /// `GET /collection`
    async fn list(&self) -> ClientResult<Vec<E>>;
    /// `GET /collection/<aux>`; empty when the collection has no lookup
    async fn list_aux(&self) -> ClientResult<Vec<String>>;
    /// `POST /collection`
    ///
    /// Any 2xx counts as success. The entity is returned only when the body
    /// holds one; the employees backend answers with `{"message": ...}`.
    async fn create(&self, payload: &E::Create) -> ClientResult<Option<E>>;
    /// `PUT /collection/<id>` with the id merged into the body
    async fn update(&self, id: EntityId, payload: &E::Create) -> ClientResult<Option<E>>;
    /// `DELETE /collection/<id>`
    async fn delete(&self, id: EntityId) -> ClientResult<()>;
    /// `GET /health`
    async fn health_check(&self) -> ClientResult<()>;
}

/// Update body: the create payload plus the id
#[derive(Serialize)]
struct WithId<'a, C: Serialize> {
    id: EntityId,
    #[serde(flatten)]
    payload: &'a C,
}

/// Collection client over an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct ResourceClient<E, H = NetworkHttpClient> {
    http: H,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, H: HttpClient> ResourceClient<E, H> {
    pub fn new(http: H) -> Self {
        Self {
            http,
            _entity: PhantomData,
        }
    }

    fn item_path(id: EntityId) -> String {
        format!("{}/{}", E::COLLECTION, id)
    }

    fn echoed(body: Option<Value>) -> Option<E> {
        body.and_then(|value| serde_json::from_value(value).ok())
    }
}

#[async_trait]
impl<E: Entity, H: HttpClient> ResourceApi<E> for ResourceClient<E, H> {
    async fn list(&self) -> ClientResult<Vec<E>> {
        let items: Vec<E> = self.http.get(E::COLLECTION).await?;
        tracing::debug!(collection = E::COLLECTION, count = items.len(), "Collection loaded");
        Ok(items)
    }

    async fn list_aux(&self) -> ClientResult<Vec<String>> {
        match E::AUX_COLLECTION {
            Some(aux) => {
                self.http
                    .get(&format!("{}/{}", E::COLLECTION, aux))
                    .await
            }
            None => Ok(Vec::new()),
        }
    }

    async fn create(&self, payload: &E::Create) -> ClientResult<Option<E>> {
        let body = self.http.post_loose(E::COLLECTION, payload).await?;
        let created = Self::echoed(body);
        tracing::info!(
            collection = E::COLLECTION,
            id = ?created.as_ref().map(Entity::id),
            "Entity created"
        );
        Ok(created)
    }

    async fn update(&self, id: EntityId, payload: &E::Create) -> ClientResult<Option<E>> {
        let body = WithId { id, payload };
        let response = self.http.put_loose(&Self::item_path(id), &body).await?;
        tracing::info!(collection = E::COLLECTION, id, "Entity updated");
        Ok(Self::echoed(response))
    }

    async fn delete(&self, id: EntityId) -> ClientResult<()> {
        self.http.delete(&Self::item_path(id)).await?;
        tracing::info!(collection = E::COLLECTION, id, "Entity deleted");
        Ok(())
    }

    async fn health_check(&self) -> ClientResult<()> {
        self.http.probe(HEALTH_PATH).await
    }
}
