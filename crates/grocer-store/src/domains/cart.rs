//! Shopping cart.

use std::sync::Arc;

use async_trait::async_trait;
use grocer_commerce::cart::{CartItem, CartItemDraft, CartItemPatch, CartSummary};
use grocer_commerce::ids::ProductId;
use grocer_commerce::CommerceError;
use grocer_data::{ApiError, Mutate};

use super::shared;
use crate::action::Action;
use crate::effects::Effects;
use crate::operation::Operation;
use crate::provider::Mount;
use crate::resource::{ResourceState, Slot};
use crate::store::{Reducer, Store};

#[derive(Debug, Clone)]
pub enum CartAction {
    GetCartStart,
    GetCartSuccess(Vec<Arc<CartItem>>),
    GetCartFailure(String),

    AddToCartStart,
    AddToCartSuccess(Arc<CartItem>),
    AddToCartFailure(String),

    UpdateCartItemStart,
    UpdateCartItemSuccess(Arc<CartItem>),
    UpdateCartItemFailure(String),

    RemoveFromCartStart,
    RemoveFromCartSuccess(Option<ProductId>),
    RemoveFromCartFailure(String),
}

impl CartAction {
    pub fn tag(&self) -> &'static str {
        use CartAction::*;
        match self {
            GetCartStart => "GET_CART_START",
            GetCartSuccess(_) => "GET_CART_SUCCESS",
            GetCartFailure(_) => "GET_CART_FAILURE",
            AddToCartStart => "ADD_TO_CART_START",
            AddToCartSuccess(_) => "ADD_TO_CART_SUCCESS",
            AddToCartFailure(_) => "ADD_TO_CART_FAILURE",
            UpdateCartItemStart => "UPDATE_CART_ITEM_START",
            UpdateCartItemSuccess(_) => "UPDATE_CART_ITEM_SUCCESS",
            UpdateCartItemFailure(_) => "UPDATE_CART_ITEM_FAILURE",
            RemoveFromCartStart => "REMOVE_FROM_CART_START",
            RemoveFromCartSuccess(_) => "REMOVE_FROM_CART_SUCCESS",
            RemoveFromCartFailure(_) => "REMOVE_FROM_CART_FAILURE",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub items: ResourceState<CartItem>,
}

impl CartState {
    /// Item count and total of the cached lines.
    pub fn summary(&self) -> Result<CartSummary, CommerceError> {
        CartSummary::from_items(self.items.collection.iter().map(|line| &**line))
    }

    /// Cached line for a product.
    pub fn line(&self, product: &ProductId) -> Option<&Arc<CartItem>> {
        self.items.find(product)
    }
}

pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    const DOMAIN: &'static str = "cart";

    fn reduce(state: &Arc<CartState>, action: &Action) -> Arc<CartState> {
        use CartAction::*;

        let Action::Cart(action) = action else {
            return Arc::clone(state);
        };
        let items = &state.items;
        let items = match action {
            GetCartStart => items.started(Slot::Collection),
            GetCartSuccess(lines) => items.collection_loaded(lines),
            GetCartFailure(message) => items.collection_failed(message),

            AddToCartStart | UpdateCartItemStart | RemoveFromCartStart => {
                items.started(Slot::Mutation)
            }
            AddToCartSuccess(line) => items.added(line),
            UpdateCartItemSuccess(line) => items.updated(line),
            RemoveFromCartSuccess(product) => items.deleted(product.as_ref()),
            AddToCartFailure(message)
            | UpdateCartItemFailure(message)
            | RemoveFromCartFailure(message) => items.mutation_failed(message),
        };
        Arc::new(CartState { items })
    }
}

/// Cart store plus its collaborator.
#[derive(Clone)]
pub struct CartContext {
    store: Store<CartReducer>,
    api: Arc<dyn Mutate<CartItem>>,
    effects: Effects,
}

impl CartContext {
    pub fn new(api: Arc<dyn Mutate<CartItem>>, effects: Effects) -> Self {
        Self {
            store: Store::new(),
            api,
            effects,
        }
    }

    pub fn store(&self) -> &Store<CartReducer> {
        &self.store
    }

    pub fn state(&self) -> Arc<CartState> {
        self.store.state()
    }

    pub fn dispatch(&self, action: CartAction) {
        self.store.dispatch(action);
    }

    fn operation(&self, name: &'static str) -> Operation<'_> {
        Operation::new(CartReducer::DOMAIN, name, &self.effects)
    }

    pub async fn get_cart(&self) -> Result<Vec<Arc<CartItem>>, ApiError> {
        self.dispatch(CartAction::GetCartStart);
        self.operation("get_cart")
            .run(
                self.api.fetch_collection(),
                |lines| {
                    let lines = shared(lines);
                    self.dispatch(CartAction::GetCartSuccess(lines.clone()));
                    lines
                },
                |error| self.dispatch(CartAction::GetCartFailure(error.message().to_string())),
            )
            .await
    }

    /// Put a product in the cart.
    ///
    /// A product already in the cart gets its quantity raised instead of a
    /// second line.
    pub async fn add_to_cart(&self, draft: CartItemDraft) -> Result<Arc<CartItem>, ApiError> {
        if let Some(line) = self.state().line(&draft.product_id).cloned() {
            let patch = match CartItemPatch::new(line.quantity.saturating_add(draft.quantity)) {
                Ok(patch) => patch,
                Err(err) => {
                    let error = ApiError::validation(err.to_string());
                    self.dispatch(CartAction::UpdateCartItemStart);
                    self.dispatch(CartAction::UpdateCartItemFailure(error.message().to_string()));
                    self.effects.error(error.message());
                    return Err(error);
                }
            };
            return self.update_quantity(&line.product_id, patch).await;
        }

        self.dispatch(CartAction::AddToCartStart);
        self.operation("add_to_cart")
            .announce(format!("{} added to cart", draft.name))
            .run(
                self.api.create(&draft),
                |line| {
                    let line = Arc::new(line);
                    self.dispatch(CartAction::AddToCartSuccess(Arc::clone(&line)));
                    line
                },
                |error| self.dispatch(CartAction::AddToCartFailure(error.message().to_string())),
            )
            .await
    }

    pub async fn update_quantity(
        &self,
        product: &ProductId,
        patch: CartItemPatch,
    ) -> Result<Arc<CartItem>, ApiError> {
        self.dispatch(CartAction::UpdateCartItemStart);
        self.operation("update_cart_item")
            .run(
                self.api.update(product, &patch),
                |line| {
                    let line = Arc::new(line);
                    self.dispatch(CartAction::UpdateCartItemSuccess(Arc::clone(&line)));
                    line
                },
                |error| {
                    self.dispatch(CartAction::UpdateCartItemFailure(error.message().to_string()))
                },
            )
            .await
    }

    pub async fn remove_from_cart(&self, product: &ProductId) -> Result<(), ApiError> {
        self.dispatch(CartAction::RemoveFromCartStart);
        self.operation("remove_from_cart")
            .announce("Item removed from cart")
            .run(
                self.api.delete(product),
                |()| self.dispatch(CartAction::RemoveFromCartSuccess(Some(product.clone()))),
                |error| {
                    self.dispatch(CartAction::RemoveFromCartFailure(error.message().to_string()))
                },
            )
            .await
    }
}

#[async_trait]
impl Mount for CartContext {
    const NAME: &'static str = "cart";

    async fn on_mount(&self) {
        let _ = self.get_cart().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::news::NewsAction;
    use crate::effects::{HistoryNavigator, RecordingNotifier};
    use grocer_commerce::catalog::Product;
    use grocer_commerce::Money;
    use grocer_data::InMemoryResource;

    fn line(id: &str, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            name: id.to_string(),
            image: None,
            unit_price: Money::usd(cents),
            quantity,
        }
    }

    fn context(
        lines: Vec<CartItem>,
    ) -> (CartContext, Arc<InMemoryResource<CartItem>>, Arc<RecordingNotifier>) {
        let api = Arc::new(InMemoryResource::seeded(lines));
        let notifier = Arc::new(RecordingNotifier::new());
        let effects = Effects::new(notifier.clone(), Arc::new(HistoryNavigator::new()));
        (CartContext::new(api.clone(), effects), api, notifier)
    }

    #[test]
    fn test_foreign_action_is_identity() {
        let state = Arc::new(CartState::default());
        let next = CartReducer::reduce(&state, &NewsAction::SetRefs(Vec::new()).into());
        assert!(Arc::ptr_eq(&state, &next));
    }

    fn apply(state: CartState, actions: Vec<CartAction>) -> Arc<CartState> {
        actions
            .into_iter()
            .fold(Arc::new(state), |state, action| {
                CartReducer::reduce(&state, &Action::Cart(action))
            })
    }

    #[test]
    fn test_start_clears_error() {
        use CartAction::*;
        for start in [
            GetCartStart,
            AddToCartStart,
            UpdateCartItemStart,
            RemoveFromCartStart,
        ] {
            let failed = apply(CartState::default(), vec![GetCartFailure("down".into())]);
            let next = CartReducer::reduce(&failed, &Action::Cart(start));
            assert_eq!(next.items.error, None);
        }
    }

    #[test]
    fn test_success_is_idempotent() {
        let (a, b) = (Arc::new(line("a", 100, 1)), Arc::new(line("b", 200, 1)));
        let fetched = CartAction::GetCartSuccess(vec![a.clone(), b.clone()]);
        let once = apply(CartState::default(), vec![fetched.clone()]);
        let twice = apply(CartState::default(), vec![fetched.clone(), fetched.clone()]);
        assert_eq!(once, twice);

        let raised = CartAction::UpdateCartItemSuccess(Arc::new(line("a", 100, 3)));
        let once = apply(CartState::default(), vec![fetched.clone(), raised.clone()]);
        let twice = apply(CartState::default(), vec![fetched, raised.clone(), raised]);
        assert_eq!(once, twice);
        assert_eq!(twice.items.collection[0].quantity, 3);
    }

    #[test]
    fn test_remove_exact_line() {
        let (a, b) = (Arc::new(line("a", 100, 1)), Arc::new(line("b", 200, 1)));
        let state = Arc::new(CartState::default());
        let state = CartReducer::reduce(
            &state,
            &CartAction::GetCartSuccess(vec![a.clone(), b.clone()]).into(),
        );
        let state = CartReducer::reduce(
            &state,
            &CartAction::RemoveFromCartSuccess(Some(ProductId::new("a"))).into(),
        );
        assert_eq!(state.items.collection.len(), 1);
        assert!(Arc::ptr_eq(&state.items.collection[0], &b));
    }

    #[tokio::test]
    async fn test_summary_after_fetch() {
        let (ctx, _, _) = context(vec![line("a", 1000, 2), line("b", 250, 1)]);
        ctx.get_cart().await.unwrap();

        let summary = ctx.state().summary().unwrap();
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total, Money::usd(2250));
    }

    #[tokio::test]
    async fn test_add_new_product_prepends() {
        let (ctx, _, notifier) = context(vec![line("a", 100, 1)]);
        ctx.get_cart().await.unwrap();

        let kiwi = Product::new("kiwi", "Kiwi", Money::usd(75));
        let draft = CartItemDraft::for_product(&kiwi, 4).unwrap();
        let added = ctx.add_to_cart(draft).await.unwrap();

        let state = ctx.state();
        assert!(Arc::ptr_eq(&state.items.collection[0], &added));
        assert_eq!(state.items.collection.len(), 2);
        assert_eq!(
            notifier.notices(),
            vec![crate::effects::Notice::Success("Kiwi added to cart".into())]
        );
    }

    #[tokio::test]
    async fn test_add_existing_product_raises_quantity() {
        let (ctx, api, _) = context(vec![line("a", 100, 2)]);
        ctx.get_cart().await.unwrap();

        let apple = Product::new("a", "a", Money::usd(100));
        let draft = CartItemDraft::for_product(&apple, 3).unwrap();
        let updated = ctx.add_to_cart(draft).await.unwrap();

        assert_eq!(updated.quantity, 5);
        assert_eq!(ctx.state().items.collection.len(), 1);
        assert_eq!(api.snapshot().await[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_add_over_limit_is_rejected() {
        let (ctx, api, notifier) = context(vec![line("a", 100, 98)]);
        ctx.get_cart().await.unwrap();

        let apple = Product::new("a", "a", Money::usd(100));
        let draft = CartItemDraft::for_product(&apple, 5).unwrap();
        let err = ctx.add_to_cart(draft).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation { .. }));
        assert_eq!(notifier.errors().len(), 1);
        assert_eq!(api.snapshot().await[0].quantity, 98);
    }

    #[tokio::test]
    async fn test_rejected_add_replaces_earlier_error() {
        let (ctx, api, notifier) = context(vec![line("a", 100, 98)]);
        ctx.get_cart().await.unwrap();
        api.fail_next(ApiError::network("stale failure")).await;
        assert!(ctx.remove_from_cart(&ProductId::new("a")).await.is_err());

        let apple = Product::new("a", "a", Money::usd(100));
        let draft = CartItemDraft::for_product(&apple, 5).unwrap();
        let err = ctx.add_to_cart(draft).await.unwrap_err();

        let state = ctx.state();
        assert_eq!(state.items.error.as_deref(), Some(err.message()));
        assert!(!state.items.mutation_loading);
        assert_eq!(state.items.collection[0].quantity, 98);
        assert_eq!(notifier.errors().last().map(String::as_str), Some(err.message()));
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_lines() {
        let (ctx, api, _) = context(vec![line("a", 100, 1)]);
        ctx.get_cart().await.unwrap();
        api.fail_next(ApiError::network("Network Error")).await;

        assert!(ctx.remove_from_cart(&ProductId::new("a")).await.is_err());
        let state = ctx.state();
        assert_eq!(state.items.collection.len(), 1);
        assert_eq!(state.items.error.as_deref(), Some("Network Error"));
    }
}
