//! Product detail page: product info, reviews and related products.

use std::sync::{Arc, Mutex, PoisonError};

use grocer_commerce::catalog::{Product, Review};
use grocer_commerce::ids::ProductId;
use grocer_data::ApiError;

use super::{Render, RequestGeneration};
use crate::domains::product::ProductContext;

/// Most related products shown under the details.
const RELATED_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub product: Arc<Product>,
    pub reviews: Vec<Review>,
    /// Other cached products, same category first.
    pub related: Vec<Arc<Product>>,
}

/// Outcome of [`ProductDetailsPage::open`].
#[derive(Debug)]
pub enum Opened {
    /// The load belongs to the route currently shown.
    Current(Result<Arc<Product>, ApiError>),
    /// Another route was opened while this load was in flight.
    Superseded,
}

pub struct ProductDetailsPage {
    products: ProductContext,
    generation: RequestGeneration,
    requested: Mutex<Option<ProductId>>,
}

impl ProductDetailsPage {
    pub fn new(products: ProductContext) -> Self {
        Self {
            products,
            generation: RequestGeneration::new(),
            requested: Mutex::new(None),
        }
    }

    /// Load the product for a route (`/product/:id`).
    pub async fn open(&self, id: &ProductId) -> Opened {
        let ticket = self.generation.begin();
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner) = Some(id.clone());

        let result = self.products.get_product(id).await;
        if self.generation.is_current(ticket) {
            Opened::Current(result)
        } else {
            tracing::debug!(id = %id, "product load superseded");
            Opened::Superseded
        }
    }

    pub fn render(&self) -> Render<ProductDetails> {
        let state = self.products.state();
        let products = &state.products;
        if products.selected_loading {
            return Render::Loading;
        }

        let requested = self
            .requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let shown = products
            .selected
            .as_ref()
            .filter(|product| requested.as_ref().map_or(true, |id| &product.id == id));

        match (shown, &products.error) {
            (Some(product), _) => Render::Ready(ProductDetails {
                product: Arc::clone(product),
                reviews: product.reviews.clone(),
                related: related(product, &products.collection),
            }),
            (None, Some(message)) => Render::Failed(message.clone()),
            (None, None) => Render::Loading,
        }
    }
}

fn related(product: &Product, catalog: &[Arc<Product>]) -> Vec<Arc<Product>> {
    let others = catalog.iter().filter(|other| other.id != product.id);
    let (same, rest): (Vec<_>, Vec<_>) = others.partition(|other| {
        !product.category.is_empty() && other.category == product.category
    });

    same.into_iter()
        .chain(rest)
        .take(RELATED_LIMIT)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storefront::testing::Fixture;

    #[tokio::test]
    async fn test_ready_with_related_products() {
        let fixture = Fixture::new();
        let storefront = fixture.mount().await;
        let page = ProductDetailsPage::new(storefront.products.context().clone());

        assert!(matches!(page.open(&ProductId::new("apple")).await, Opened::Current(Ok(_))));

        let details = page.render().ready().unwrap();
        assert_eq!(details.product.id, ProductId::new("apple"));
        let related: Vec<_> = details.related.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(related, vec!["pear", "milk"]);
    }

    #[tokio::test]
    async fn test_spinner_while_loading() {
        let fixture = Fixture::new();
        let storefront = fixture.mount().await;
        let page = Arc::new(ProductDetailsPage::new(storefront.products.context().clone()));
        let gate = fixture.products.hold().await;

        let pending = {
            let page = Arc::clone(&page);
            tokio::spawn(async move { page.open(&ProductId::new("milk")).await })
        };
        tokio::task::yield_now().await;
        assert!(page.render().is_loading());

        gate.release();
        pending.await.unwrap();
        assert_eq!(
            page.render().ready().map(|d| d.product.name.clone()).as_deref(),
            Some("Product milk")
        );
    }

    #[tokio::test]
    async fn test_stale_load_is_not_shown() {
        let fixture = Fixture::new();
        let storefront = fixture.mount().await;
        let page = Arc::new(ProductDetailsPage::new(storefront.products.context().clone()));

        let gate = fixture.products.hold().await;
        let slow = {
            let page = Arc::clone(&page);
            tokio::spawn(async move { page.open(&ProductId::new("apple")).await })
        };
        tokio::task::yield_now().await;

        assert!(matches!(page.open(&ProductId::new("pear")).await, Opened::Current(Ok(_))));
        gate.release();
        assert!(matches!(slow.await.unwrap(), Opened::Superseded));

        // The store applied the late response last, but the page ignores it.
        let state = storefront.products.state();
        assert_eq!(state.products.selected.as_ref().unwrap().id, ProductId::new("apple"));
        assert!(page.render().is_loading());
    }

    #[tokio::test]
    async fn test_missing_product_fails() {
        let fixture = Fixture::new();
        let storefront = fixture.mount().await;
        let page = ProductDetailsPage::new(storefront.products.context().clone());

        assert!(matches!(page.open(&ProductId::new("caviar")).await, Opened::Current(Err(_))));
        assert!(matches!(page.render(), Render::Failed(_)));
        assert_eq!(fixture.notifier.errors().len(), 1);
    }
}
