//! The context root: every domain provider, mounted together.

use std::sync::Arc;

use grocer_commerce::account::Address;
use grocer_commerce::cart::CartItem;
use grocer_commerce::catalog::Product;
use grocer_commerce::news::NewsItem;
use grocer_commerce::order::Order;
use grocer_data::{Fetch, FetchClient, Mutate, RestResource, RestSession, Session};

use crate::config::StoreConfig;
use crate::domains::cart::CartContext;
use crate::domains::news::NewsContext;
use crate::domains::order::OrderContext;
use crate::domains::product::ProductContext;
use crate::domains::user::UserContext;
use crate::effects::Effects;
use crate::provider::Provider;

/// Network collaborators for every domain.
#[derive(Clone)]
pub struct Services {
    pub news: Arc<dyn Mutate<NewsItem>>,
    pub products: Arc<dyn Fetch<Product>>,
    pub cart: Arc<dyn Mutate<CartItem>>,
    pub session: Arc<dyn Session>,
    pub addresses: Arc<dyn Mutate<Address>>,
    pub orders: Arc<dyn Mutate<Order>>,
}

impl Services {
    /// Collaborators over the storefront REST API.
    pub fn rest(client: FetchClient) -> Self {
        Self {
            news: Arc::new(RestResource::<NewsItem>::new(client.clone(), "/news")),
            products: Arc::new(RestResource::<Product>::new(client.clone(), "/products")),
            cart: Arc::new(RestResource::<CartItem>::new(client.clone(), "/cart")),
            session: Arc::new(RestSession::new(client.clone())),
            addresses: Arc::new(RestResource::<Address>::new(
                client.clone(),
                "/users/me/addresses",
            )),
            orders: Arc::new(RestResource::<Order>::new(client, "/orders")),
        }
    }
}

/// All five providers. Pages receive this instead of reaching for globals.
pub struct Storefront {
    pub news: Provider<NewsContext>,
    pub products: Provider<ProductContext>,
    pub cart: Provider<CartContext>,
    pub user: Provider<UserContext>,
    pub orders: Provider<OrderContext>,
    config: StoreConfig,
}

impl Storefront {
    /// Mount every provider; each starts its own auto-fetch.
    pub fn mount(services: Services, effects: Effects, config: StoreConfig) -> Self {
        tracing::debug!("mounting storefront");
        Self {
            news: Provider::mount(NewsContext::new(services.news, effects.clone())),
            products: Provider::mount(ProductContext::new(
                services.products,
                effects.clone(),
                config.clone(),
            )),
            cart: Provider::mount(CartContext::new(services.cart, effects.clone())),
            user: Provider::mount(UserContext::new(
                services.session,
                services.addresses,
                effects.clone(),
            )),
            orders: Provider::mount(OrderContext::new(services.orders, effects)),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Wait until every auto-fetch settled.
    pub async fn settled(&mut self) {
        futures::join!(
            self.news.settled(),
            self.products.settled(),
            self.cart.settled(),
            self.user.settled(),
            self.orders.settled(),
        );
    }

    pub fn unmount(self) {
        self.news.unmount();
        self.products.unmount();
        self.cart.unmount();
        self.user.unmount();
        self.orders.unmount();
    }
}
