//! In-memory collaborators.
//!
//! Used by the state-layer tests and by the CLI's `--offline` mode. Each
//! resource keeps its records in a vector (newest first), can be scripted to
//! fail, and can be paused mid-request with [`InMemoryResource::hold`] to
//! observe loading states.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use grocer_commerce::account::{Address, UserProfile};
use grocer_commerce::cart::CartItem;
use grocer_commerce::ids::{AddressId, NewsItemId, OrderId};
use grocer_commerce::news::NewsItem;
use grocer_commerce::order::{Order, OrderStatus};
use grocer_commerce::{Entity, Mutable};
use tokio::sync::{oneshot, Mutex};

use crate::resource::{Fetch, Mutate, Session};
use crate::ApiError;

/// How a locally stored record is created from a draft and edited by a patch.
///
/// Mirrors what the server does for the real endpoint closely enough for
/// the client to behave the same.
pub trait Materialize: Mutable + Clone {
    fn materialize(draft: &Self::Draft) -> Self;
    fn apply_patch(&mut self, patch: &Self::Patch);
}

impl Materialize for NewsItem {
    fn materialize(draft: &Self::Draft) -> Self {
        NewsItem {
            id: NewsItemId::generate(),
            title: draft.title.clone(),
            text: draft.text.clone(),
            image: draft.image.clone(),
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: &Self::Patch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(image) = &patch.image {
            self.image = Some(image.clone());
        }
    }
}

impl Materialize for CartItem {
    fn materialize(draft: &Self::Draft) -> Self {
        CartItem {
            product_id: draft.product_id.clone(),
            name: draft.name.clone(),
            image: None,
            unit_price: draft.unit_price,
            quantity: draft.quantity,
        }
    }

    fn apply_patch(&mut self, patch: &Self::Patch) {
        self.quantity = patch.quantity;
    }
}

impl Materialize for Address {
    fn materialize(draft: &Self::Draft) -> Self {
        draft.clone().into_address(AddressId::generate())
    }

    fn apply_patch(&mut self, patch: &Self::Patch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(address1) = &patch.address1 {
            self.address1 = address1.clone();
        }
        if let Some(city) = &patch.city {
            self.city = city.clone();
        }
        if let Some(zip) = &patch.zip {
            self.zip = zip.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
    }
}

impl Materialize for Order {
    fn materialize(draft: &Self::Draft) -> Self {
        Order {
            id: OrderId::generate(),
            user: draft.user.clone(),
            ordered_products: draft.ordered_products.clone(),
            total_price: draft.total_price,
            delivery_fee: draft.delivery_fee,
            payment_method: draft.payment_method,
            address: draft.address.clone(),
            notes: draft.notes.clone(),
            status: OrderStatus::Received,
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: &Self::Patch) {
        self.status = patch.status;
    }
}

/// Releases a request paused by [`InMemoryResource::hold`].
pub struct Gate {
    tx: oneshot::Sender<()>,
}

impl Gate {
    pub fn release(self) {
        let _ = self.tx.send(());
    }
}

/// Collaborator backed by a local vector of records.
pub struct InMemoryResource<E> {
    records: Mutex<Vec<E>>,
    failures: Mutex<VecDeque<ApiError>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl<E: Entity + Clone> InMemoryResource<E> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Start with the given records, newest first.
    pub fn seeded(records: Vec<E>) -> Self {
        Self {
            records: Mutex::new(records),
            failures: Mutex::new(VecDeque::new()),
            gate: Mutex::new(None),
            latency: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Delay every call, to simulate a slow network.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make the next call fail with `error`. Queued failures are consumed
    /// in order.
    pub async fn fail_next(&self, error: ApiError) {
        self.failures.lock().await.push_back(error);
    }

    /// Pause the next call until the returned gate is released.
    pub async fn hold(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().await = Some(rx);
        Gate { tx }
    }

    /// Number of calls served so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Current records.
    pub async fn snapshot(&self) -> Vec<E> {
        self.records.lock().await.clone()
    }

    async fn enter(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().await.take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.failures.lock().await.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn missing(id: &E::Id) -> ApiError {
        ApiError::not_found(format!("No {} found with ID {}", E::KIND, id))
    }
}

impl<E: Entity + Clone> Default for InMemoryResource<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity + Clone> Fetch<E> for InMemoryResource<E> {
    async fn fetch_collection(&self) -> Result<Vec<E>, ApiError> {
        self.enter().await?;
        Ok(self.records.lock().await.clone())
    }

    async fn fetch_one(&self, id: &E::Id) -> Result<E, ApiError> {
        self.enter().await?;
        self.records
            .lock()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| Self::missing(id))
    }
}

#[async_trait]
impl<E: Materialize> Mutate<E> for InMemoryResource<E> {
    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError> {
        self.enter().await?;
        let record = E::materialize(draft);
        self.records.lock().await.insert(0, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &E::Id, patch: &E::Patch) -> Result<E, ApiError> {
        self.enter().await?;
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| Self::missing(id))?;
        record.apply_patch(patch);
        Ok(record.clone())
    }

    async fn delete(&self, id: &E::Id) -> Result<(), ApiError> {
        self.enter().await?;
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Err(Self::missing(id));
        }
        Ok(())
    }
}

/// Session returning a fixed profile.
pub struct InMemorySession {
    user: Option<UserProfile>,
    failures: Mutex<VecDeque<ApiError>>,
}

impl InMemorySession {
    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            failures: Mutex::new(VecDeque::new()),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            failures: Mutex::new(VecDeque::new()),
        }
    }

    pub async fn fail_next(&self, error: ApiError) {
        self.failures.lock().await.push_back(error);
    }
}

#[async_trait]
impl Session for InMemorySession {
    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        if let Some(error) = self.failures.lock().await.pop_front() {
            return Err(error);
        }
        self.user
            .clone()
            .ok_or_else(|| ApiError::network("You are not logged in. Please log in to get access."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_commerce::catalog::Product;
    use grocer_commerce::ids::ProductId;
    use grocer_commerce::news::{NewsDraft, NewsPatch};
    use grocer_commerce::Money;
    use std::sync::Arc;

    fn draft(title: &str) -> NewsDraft {
        NewsDraft {
            title: title.into(),
            text: "Body".into(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_prepends_with_fresh_id() {
        let news = InMemoryResource::<NewsItem>::new();
        let first = news.create(&draft("First")).await.unwrap();
        let second = news.create(&draft("Second")).await.unwrap();

        assert_ne!(first.id, second.id);
        let all = news.fetch_collection().await.unwrap();
        assert_eq!(all[0].title, "Second");
        assert_eq!(all[1].title, "First");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let news = InMemoryResource::<NewsItem>::new();
        let item = news.create(&draft("Draft")).await.unwrap();

        let patch = NewsPatch {
            title: Some("Final".into()),
            ..Default::default()
        };
        let updated = news.update(&item.id, &patch).await.unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.text, "Body");

        news.delete(&item.id).await.unwrap();
        let err = news.fetch_one(&item.id).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(news.delete(&item.id).await.is_err());
    }

    #[tokio::test]
    async fn test_scripted_failure_is_consumed_once() {
        let products = InMemoryResource::seeded(vec![Product::new("p1", "Milk", Money::usd(120))]);
        products.fail_next(ApiError::network("Network Error")).await;

        assert_eq!(
            products.fetch_collection().await.unwrap_err(),
            ApiError::network("Network Error")
        );
        assert_eq!(products.fetch_collection().await.unwrap().len(), 1);
        assert_eq!(products.calls(), 2);
    }

    #[tokio::test]
    async fn test_hold_pauses_until_released() {
        let products = Arc::new(InMemoryResource::seeded(vec![Product::new(
            "p1",
            "Milk",
            Money::usd(120),
        )]));
        let gate = products.hold().await;

        let pending = {
            let products = Arc::clone(&products);
            tokio::spawn(async move { products.fetch_one(&ProductId::new("p1")).await })
        };
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        gate.release();
        let product = pending.await.unwrap().unwrap();
        assert_eq!(product.name, "Milk");
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency() {
        let news = InMemoryResource::<NewsItem>::new().with_latency(Duration::from_millis(300));
        let started = tokio::time::Instant::now();
        news.fetch_collection().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_anonymous_session() {
        let session = InMemorySession::anonymous();
        assert!(session.current_user().await.is_err());
    }
}
