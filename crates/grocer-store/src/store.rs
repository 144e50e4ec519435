//! The store: current state plus the dispatch entry point.

use std::sync::Arc;

use tokio::sync::watch;

use crate::action::Action;

/// Pure state transition function of one domain.
///
/// `reduce` must return the very same `Arc` for actions it does not handle,
/// so that unrelated dispatches are observable as no-ops.
pub trait Reducer: Send + Sync + 'static {
    type State: Default + Send + Sync + 'static;

    /// Domain name used in log fields.
    const DOMAIN: &'static str;

    fn reduce(state: &Arc<Self::State>, action: &Action) -> Arc<Self::State>;
}

/// Holds the current state of one domain and publishes every change.
///
/// Cloning a store yields another handle to the same state.
pub struct Store<R: Reducer> {
    state: Arc<watch::Sender<Arc<R::State>>>,
}

impl<R: Reducer> Store<R> {
    /// Create a store in the domain's initial state.
    pub fn new() -> Self {
        Self::with_state(R::State::default())
    }

    pub fn with_state(state: R::State) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(state));
        Self {
            state: Arc::new(tx),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> Arc<R::State> {
        Arc::clone(&self.state.borrow())
    }

    /// Receive every state published from now on.
    pub fn subscribe(&self) -> watch::Receiver<Arc<R::State>> {
        self.state.subscribe()
    }

    /// Run the reducer and publish the result.
    ///
    /// Subscribers are only woken when the reducer produced a new state.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        tracing::trace!(domain = R::DOMAIN, action = action.tag(), "dispatch");

        self.state.send_if_modified(|current| {
            let next = R::reduce(current, &action);
            if Arc::ptr_eq(current, &next) {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::cart::CartAction;
    use crate::domains::news::{NewsAction, NewsReducer};
    use grocer_commerce::news::NewsItem;
    use grocer_commerce::NewsItemId;

    fn item(id: &str) -> Arc<NewsItem> {
        Arc::new(NewsItem {
            id: NewsItemId::new(id),
            title: id.to_string(),
            text: String::new(),
            image: None,
            created_at: chrono::Utc::now(),
        })
    }

    #[test]
    fn test_dispatch_replaces_state() {
        let store: Store<NewsReducer> = Store::new();
        let before = store.state();

        store.dispatch(NewsAction::GetNewsStart);

        let after = store.state();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(after.news.collection_loading);
    }

    #[test]
    fn test_foreign_action_does_not_notify() {
        let store: Store<NewsReducer> = Store::new();
        let rx = store.subscribe();
        let before = store.state();

        store.dispatch(CartAction::GetCartStart);

        assert!(Arc::ptr_eq(&before, &store.state()));
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_every_subscriber_sees_change() {
        let store: Store<NewsReducer> = Store::new();
        let mut first = store.subscribe();
        let mut second = store.clone().subscribe();

        store.dispatch(NewsAction::GetNewsSuccess(vec![item("a"), item("b")]));

        first.changed().await.unwrap();
        second.changed().await.unwrap();
        assert_eq!(first.borrow().news.collection.len(), 2);
        assert_eq!(second.borrow().news.collection.len(), 2);
    }
}
