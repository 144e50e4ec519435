//! Catalog: product list and product detail.

use std::sync::Arc;

use async_trait::async_trait;
use grocer_commerce::catalog::Product;
use grocer_commerce::ids::ProductId;
use grocer_data::{ApiError, Fetch};

use super::shared;
use crate::action::Action;
use crate::config::StoreConfig;
use crate::effects::Effects;
use crate::operation::Operation;
use crate::provider::Mount;
use crate::resource::{ResourceState, Slot};
use crate::store::{Reducer, Store};

#[derive(Debug, Clone)]
pub enum ProductAction {
    GetProductsStart,
    GetProductsSuccess(Vec<Arc<Product>>),
    GetProductsFailure(String),

    GetProductStart,
    GetProductSuccess(Arc<Product>),
    GetProductFailure(String),
}

impl ProductAction {
    pub fn tag(&self) -> &'static str {
        use ProductAction::*;
        match self {
            GetProductsStart => "GET_PRODUCTS_START",
            GetProductsSuccess(_) => "GET_PRODUCTS_SUCCESS",
            GetProductsFailure(_) => "GET_PRODUCTS_FAILURE",
            GetProductStart => "GET_PRODUCT_START",
            GetProductSuccess(_) => "GET_PRODUCT_SUCCESS",
            GetProductFailure(_) => "GET_PRODUCT_FAILURE",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductState {
    pub products: ResourceState<Product>,
}

pub struct ProductReducer;

impl Reducer for ProductReducer {
    type State = ProductState;
    const DOMAIN: &'static str = "product";

    fn reduce(state: &Arc<ProductState>, action: &Action) -> Arc<ProductState> {
        use ProductAction::*;

        let Action::Product(action) = action else {
            return Arc::clone(state);
        };
        let products = &state.products;
        let products = match action {
            GetProductsStart => products.started(Slot::Collection),
            GetProductsSuccess(items) => products.collection_loaded(items),
            GetProductsFailure(message) => products.collection_failed(message),
            GetProductStart => products.started(Slot::Selected),
            GetProductSuccess(item) => products.item_loaded(item),
            GetProductFailure(message) => products.item_failed(message),
        };
        Arc::new(ProductState { products })
    }
}

/// Product store plus its read-only collaborator.
#[derive(Clone)]
pub struct ProductContext {
    store: Store<ProductReducer>,
    api: Arc<dyn Fetch<Product>>,
    effects: Effects,
    config: StoreConfig,
}

impl ProductContext {
    pub fn new(api: Arc<dyn Fetch<Product>>, effects: Effects, config: StoreConfig) -> Self {
        Self {
            store: Store::new(),
            api,
            effects,
            config,
        }
    }

    pub fn store(&self) -> &Store<ProductReducer> {
        &self.store
    }

    pub fn state(&self) -> Arc<ProductState> {
        self.store.state()
    }

    pub fn dispatch(&self, action: ProductAction) {
        self.store.dispatch(action);
    }

    fn operation(&self, name: &'static str) -> Operation<'_> {
        Operation::new(ProductReducer::DOMAIN, name, &self.effects)
    }

    pub async fn get_products(&self) -> Result<Vec<Arc<Product>>, ApiError> {
        self.dispatch(ProductAction::GetProductsStart);
        self.operation("get_products")
            .run(
                self.api.fetch_collection(),
                |items| {
                    let items = shared(items);
                    self.dispatch(ProductAction::GetProductsSuccess(items.clone()));
                    items
                },
                |error| {
                    self.dispatch(ProductAction::GetProductsFailure(error.message().to_string()))
                },
            )
            .await
    }

    /// Load one product for the detail page.
    ///
    /// A product that cannot be loaded leaves the page: after the error toast
    /// the user is sent to `not_found_redirect` once `redirect_delay` has
    /// passed.
    pub async fn get_product(&self, id: &ProductId) -> Result<Arc<Product>, ApiError> {
        self.dispatch(ProductAction::GetProductStart);
        let result = self
            .operation("get_product")
            .run(
                self.api.fetch_one(id),
                |item| {
                    let item = Arc::new(item);
                    self.dispatch(ProductAction::GetProductSuccess(Arc::clone(&item)));
                    item
                },
                |error| {
                    self.dispatch(ProductAction::GetProductFailure(error.message().to_string()))
                },
            )
            .await;

        if result.is_err() {
            self.schedule_redirect();
        }
        result
    }

    fn schedule_redirect(&self) {
        let navigator = Arc::clone(&self.effects.navigator);
        let delay = self.config.redirect_delay();
        let path = self.config.not_found_redirect.clone();

        tracing::debug!(
            path = %path,
            delay_ms = self.config.redirect_delay_ms,
            "redirect scheduled"
        );
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(&path);
        });
    }
}

#[async_trait]
impl Mount for ProductContext {
    const NAME: &'static str = "product";

    async fn on_mount(&self) {
        let _ = self.get_products().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::user::UserAction;
    use crate::effects::{HistoryNavigator, RecordingNotifier};
    use grocer_commerce::Money;
    use grocer_data::InMemoryResource;
    use std::time::Duration;

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {}", id), Money::usd(199))
    }

    struct Harness {
        ctx: ProductContext,
        api: Arc<InMemoryResource<Product>>,
        notifier: Arc<RecordingNotifier>,
        navigator: Arc<HistoryNavigator>,
    }

    fn harness() -> Harness {
        let api = Arc::new(InMemoryResource::seeded(vec![product("a"), product("b")]));
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(HistoryNavigator::new());
        let effects = Effects::new(notifier.clone(), navigator.clone());
        Harness {
            ctx: ProductContext::new(api.clone(), effects, StoreConfig::default()),
            api,
            notifier,
            navigator,
        }
    }

    #[test]
    fn test_foreign_action_is_identity() {
        let state = Arc::new(ProductState::default());
        let next = ProductReducer::reduce(&state, &UserAction::SignOut.into());
        assert!(Arc::ptr_eq(&state, &next));
    }

    fn apply(actions: Vec<ProductAction>) -> Arc<ProductState> {
        actions
            .into_iter()
            .fold(Arc::new(ProductState::default()), |state, action| {
                ProductReducer::reduce(&state, &Action::Product(action))
            })
    }

    #[test]
    fn test_start_clears_error() {
        use ProductAction::*;
        for start in [GetProductsStart, GetProductStart] {
            let failed = apply(vec![GetProductsFailure("down".into())]);
            let next = ProductReducer::reduce(&failed, &Action::Product(start));
            assert_eq!(next.products.error, None);
        }
    }

    #[test]
    fn test_success_is_idempotent() {
        use ProductAction::*;
        let (a, b) = (Arc::new(product("a")), Arc::new(product("b")));
        let fetched = GetProductsSuccess(vec![a.clone(), b.clone()]);
        assert_eq!(
            apply(vec![fetched.clone()]),
            apply(vec![fetched.clone(), fetched.clone()])
        );

        let opened = GetProductSuccess(b);
        assert_eq!(
            apply(vec![fetched.clone(), opened.clone()]),
            apply(vec![fetched, opened.clone(), opened])
        );
    }

    #[test]
    fn test_product_start_keeps_previous_selection() {
        let a = Arc::new(product("a"));
        let state = Arc::new(ProductState::default());
        let state =
            ProductReducer::reduce(&state, &ProductAction::GetProductSuccess(a.clone()).into());
        let state = ProductReducer::reduce(&state, &ProductAction::GetProductStart.into());

        assert!(state.products.selected_loading);
        assert!(Arc::ptr_eq(state.products.selected.as_ref().unwrap(), &a));
    }

    #[test]
    fn test_product_failure_clears_selection() {
        let a = Arc::new(product("a"));
        let state = Arc::new(ProductState::default());
        let state = ProductReducer::reduce(&state, &ProductAction::GetProductSuccess(a).into());
        let state = ProductReducer::reduce(
            &state,
            &ProductAction::GetProductFailure("No product found with that ID".into()).into(),
        );

        assert_eq!(state.products.selected, None);
        assert!(!state.products.selected_loading);
        assert_eq!(
            state.products.error.as_deref(),
            Some("No product found with that ID")
        );
    }

    #[tokio::test]
    async fn test_get_product_success() {
        let h = harness();
        let found = h.ctx.get_product(&ProductId::new("b")).await.unwrap();

        assert_eq!(found.name, "Product b");
        assert!(Arc::ptr_eq(h.ctx.state().products.selected.as_ref().unwrap(), &found));
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_product_redirects_after_delay() {
        let h = harness();

        let err = h.ctx.get_product(&ProductId::new("zzz")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(h.notifier.errors(), vec![err.message().to_string()]);
        assert_eq!(h.ctx.state().products.error.as_deref(), Some(err.message()));
        assert_eq!(h.navigator.current(), None);

        tokio::time::sleep(Duration::from_millis(3999)).await;
        assert_eq!(h.navigator.current(), None);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(h.navigator.current().as_deref(), Some("/"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_redirect_follows_config() {
        let api = Arc::new(InMemoryResource::<Product>::new());
        let navigator = Arc::new(HistoryNavigator::new());
        let effects = Effects::new(Arc::new(RecordingNotifier::new()), navigator.clone());
        let config = StoreConfig {
            not_found_redirect: "/products".into(),
            ..StoreConfig::default()
        }
        .with_redirect_delay(Duration::from_millis(500));
        let ctx = ProductContext::new(api, effects, config);

        assert!(ctx.get_product(&ProductId::new("x")).await.is_err());
        tokio::time::sleep(Duration::from_millis(501)).await;
        assert_eq!(navigator.history(), vec!["/products".to_string()]);
    }

    #[tokio::test]
    async fn test_list_failure_does_not_redirect() {
        let h = harness();
        h.api.fail_next(ApiError::network("Network Error")).await;

        assert!(h.ctx.get_products().await.is_err());
        tokio::task::yield_now().await;
        assert!(h.ctx.state().products.collection.is_empty());
        assert_eq!(h.navigator.current(), None);
    }
}
