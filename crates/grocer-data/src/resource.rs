//! Network collaborator contracts and their REST implementation.

use std::fmt::Display;
use std::marker::PhantomData;

use async_trait::async_trait;
use grocer_commerce::account::UserProfile;
use grocer_commerce::{Entity, Mutable};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{ApiError, FetchClient};

/// Read half of a domain's network collaborator.
#[async_trait]
pub trait Fetch<E: Entity>: Send + Sync {
    /// Load the whole collection.
    async fn fetch_collection(&self) -> Result<Vec<E>, ApiError>;

    /// Load one record by id.
    async fn fetch_one(&self, id: &E::Id) -> Result<E, ApiError>;
}

/// Write half of a domain's network collaborator.
#[async_trait]
pub trait Mutate<E: Mutable>: Fetch<E> {
    /// Create a record; the returned value carries the server-assigned id.
    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError>;

    /// Apply a partial update and return the server-canonical record.
    async fn update(&self, id: &E::Id, patch: &E::Patch) -> Result<E, ApiError>;

    /// Delete a record.
    async fn delete(&self, id: &E::Id) -> Result<(), ApiError>;
}

/// Source of the signed-in user's profile.
#[async_trait]
pub trait Session: Send + Sync {
    async fn current_user(&self) -> Result<UserProfile, ApiError>;
}

/// Collaborator over a REST collection endpoint (`/news`, `/news/:id`).
pub struct RestResource<E> {
    client: FetchClient,
    path: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E> RestResource<E> {
    pub fn new(client: FetchClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn item_path(&self, id: &impl Display) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), id)
    }
}

impl<E> Clone for RestResource<E> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone(), self.path.clone())
    }
}

#[async_trait]
impl<E> Fetch<E> for RestResource<E>
where
    E: Entity + DeserializeOwned,
{
    async fn fetch_collection(&self) -> Result<Vec<E>, ApiError> {
        let response = self.client.get(self.path.as_str()).send().await?;
        Ok(response.error_for_status()?.data()?)
    }

    async fn fetch_one(&self, id: &E::Id) -> Result<E, ApiError> {
        let response = self.client.get(self.item_path(id)).send().await?;
        Ok(response.error_for_status()?.data()?)
    }
}

#[async_trait]
impl<E> Mutate<E> for RestResource<E>
where
    E: Mutable + DeserializeOwned,
    E::Draft: Serialize,
    E::Patch: Serialize,
{
    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError> {
        let response = self.client.post(self.path.as_str()).json(draft)?.send().await?;
        Ok(response.error_for_status()?.data()?)
    }

    async fn update(&self, id: &E::Id, patch: &E::Patch) -> Result<E, ApiError> {
        let response = self.client.patch(self.item_path(id)).json(patch)?.send().await?;
        Ok(response.error_for_status()?.data()?)
    }

    async fn delete(&self, id: &E::Id) -> Result<(), ApiError> {
        self.client
            .delete(self.item_path(id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Profile endpoint (`GET /users/me`).
#[derive(Clone)]
pub struct RestSession {
    client: FetchClient,
    path: String,
}

impl RestSession {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            path: "/users/me".to_string(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

#[async_trait]
impl Session for RestSession {
    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let response = self.client.get(self.path.as_str()).send().await?;
        Ok(response.error_for_status()?.data()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use grocer_commerce::catalog::Product;
    use grocer_commerce::ids::{NewsItemId, ProductId};
    use grocer_commerce::news::{NewsItem, NewsPatch};
    use http::Method;

    #[tokio::test]
    async fn test_fetch_collection_unwraps_envelope() {
        let transport = ScriptedTransport::respond(
            200,
            r#"{"status":"success","data":[{"_id":"p1","name":"Milk","price":1.2}]}"#,
        );
        let products: RestResource<Product> =
            RestResource::new(FetchClient::from_shared(transport.clone()), "/products");

        let all = products.fetch_collection().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, ProductId::new("p1"));
    }

    #[tokio::test]
    async fn test_fetch_one_not_found() {
        let transport = ScriptedTransport::respond(
            404,
            r#"{"status":"fail","message":"No product found with that ID"}"#,
        );
        let products: RestResource<Product> =
            RestResource::new(FetchClient::from_shared(transport.clone()), "/products/");

        let err = products.fetch_one(&ProductId::new("nope")).await.unwrap_err();
        assert_eq!(err, ApiError::not_found("No product found with that ID"));
        assert_eq!(transport.requests.lock().await[0].url(), "/products/nope");
    }

    #[tokio::test]
    async fn test_update_sends_patch() {
        let transport = ScriptedTransport::respond(
            200,
            r#"{"data":{"_id":"n1","title":"Edited","text":"","createdAt":"2024-01-01T00:00:00Z"}}"#,
        );
        let news: RestResource<NewsItem> =
            RestResource::new(FetchClient::from_shared(transport.clone()), "/news");

        let patch = NewsPatch {
            title: Some("Edited".into()),
            ..Default::default()
        };
        let updated = news.update(&NewsItemId::new("n1"), &patch).await.unwrap();
        assert_eq!(updated.title, "Edited");

        let requests = transport.requests.lock().await;
        assert_eq!(requests[0].method(), &Method::PATCH);
        assert_eq!(requests[0].body(), Some(br#"{"title":"Edited"}"#.as_slice()));
    }

    #[tokio::test]
    async fn test_delete_validation_failure() {
        let transport =
            ScriptedTransport::respond(400, r#"{"message":"Published items cannot be deleted"}"#);
        let news: RestResource<NewsItem> =
            RestResource::new(FetchClient::from_shared(transport), "/news");

        let err = news.delete(&NewsItemId::new("n1")).await.unwrap_err();
        assert_eq!(err, ApiError::validation("Published items cannot be deleted"));
    }

    #[tokio::test]
    async fn test_session_reads_profile() {
        let transport = ScriptedTransport::respond(
            200,
            r#"{"data":{"_id":"u1","firstName":"Ada","lastName":"L","email":"ada@example.com"}}"#,
        );
        let session = RestSession::new(FetchClient::from_shared(transport));
        let user = session.current_user().await.unwrap();
        assert_eq!(user.full_name(), "Ada L");
    }
}
