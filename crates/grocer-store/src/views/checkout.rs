//! Checkout: bill card and order placement.

use std::sync::Arc;

use grocer_commerce::account::Address;
use grocer_commerce::cart::CartSummary;
use grocer_commerce::order::{Order, OrderDraft, PaymentMethod};
use grocer_commerce::shipping::ShippingPolicy;
use grocer_commerce::{CommerceError, Money};

use super::Render;
use crate::domains::cart::{CartContext, CartState};
use crate::domains::order::OrderContext;
use crate::domains::user::UserContext;
use crate::error::CheckoutError;
use crate::storefront::Storefront;

/// Totals shown on the bill card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bill {
    pub item_count: u32,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl Bill {
    fn for_cart(cart: &CartState, policy: &ShippingPolicy) -> Result<Self, CommerceError> {
        let CartSummary { item_count, total: subtotal } = cart.summary()?;
        let delivery_fee = if item_count == 0 {
            Money::zero(subtotal.currency)
        } else {
            policy.delivery_fee(&subtotal)
        };
        let total = subtotal
            .try_add(&delivery_fee)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            item_count,
            subtotal,
            delivery_fee,
            total,
        })
    }
}

pub struct CheckoutPage {
    cart: CartContext,
    user: UserContext,
    orders: OrderContext,
    shipping: ShippingPolicy,
}

impl CheckoutPage {
    pub fn new(storefront: &Storefront) -> Self {
        Self {
            cart: storefront.cart.context().clone(),
            user: storefront.user.context().clone(),
            orders: storefront.orders.context().clone(),
            shipping: storefront.config().shipping,
        }
    }

    pub fn render(&self) -> Render<Bill> {
        let cart = self.cart.state();
        if cart.items.collection_loading {
            return Render::Loading;
        }
        if cart.items.collection.is_empty() {
            if let Some(message) = &cart.items.error {
                return Render::Failed(message.clone());
            }
        }
        match Bill::for_cart(&cart, &self.shipping) {
            Ok(bill) => Render::Ready(bill),
            Err(error) => Render::Failed(error.to_string()),
        }
    }

    /// Place an order for the current cart.
    ///
    /// Uses the address selected in the user store. The cart is reloaded
    /// once the order exists, since the API empties it server-side.
    pub async fn place_order(
        &self,
        payment: Option<PaymentMethod>,
        notes: Option<String>,
    ) -> Result<Arc<Order>, CheckoutError> {
        let cart = self.cart.state();
        if cart.items.collection.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let user = self.user.state();
        let profile = user.profile.as_ref().ok_or(CheckoutError::SignedOut)?;
        let address = user.selected_address().ok_or(CheckoutError::NoAddress)?;
        let payment = payment.ok_or(CheckoutError::NoPaymentMethod)?;

        let draft = OrderDraft::from_cart(
            cart.items.collection.iter().map(|line| &**line),
            profile.id.clone(),
            Address::clone(address),
            payment,
            notes,
            &self.shipping,
        )?;

        let order = self.orders.create_order(draft).await?;
        tracing::info!(order = %order.id, total = %order.total_price.display(), "order placed");

        if let Err(error) = self.cart.get_cart().await {
            tracing::warn!(error = %error, "cart refresh after checkout failed");
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storefront::testing::{cart_line, product, Fixture};
    use grocer_commerce::ids::AddressId;
    use grocer_commerce::order::OrderStatus;

    #[tokio::test]
    async fn test_bill_adds_delivery_fee_below_threshold() {
        let fixture = Fixture::new();
        let storefront = fixture.mount().await;
        let page = CheckoutPage::new(&storefront);

        let bill = page.render().ready().unwrap();
        assert_eq!(bill.item_count, 3);
        assert_eq!(bill.subtotal, Money::usd(360));
        assert_eq!(bill.delivery_fee, Money::usd(500));
        assert_eq!(bill.total, Money::usd(860));
    }

    #[tokio::test]
    async fn test_bill_free_delivery_above_threshold() {
        let fixture = Fixture::new();
        let storefront = fixture.mount().await;
        let expensive = product("wine", "drinks", 6000);
        storefront
            .cart
            .dispatch(crate::domains::cart::CartAction::GetCartSuccess(vec![Arc::new(
                cart_line(&expensive, 1),
            )]));

        let bill = CheckoutPage::new(&storefront).render().ready().unwrap();
        assert!(bill.delivery_fee.is_zero());
        assert_eq!(bill.total, Money::usd(6000));
    }

    #[tokio::test]
    async fn test_place_order_requires_choices() {
        let fixture = Fixture::new();
        let storefront = fixture.mount().await;
        let page = CheckoutPage::new(&storefront);

        let err = page.place_order(Some(PaymentMethod::Card), None).await.unwrap_err();
        assert_eq!(err, CheckoutError::NoAddress);

        storefront.user.select_address(Some(AddressId::new("home")));
        let err = page.place_order(None, None).await.unwrap_err();
        assert_eq!(err, CheckoutError::NoPaymentMethod);
        assert_eq!(fixture.orders.calls(), 1);
    }

    #[tokio::test]
    async fn test_place_order_signed_out() {
        let fixture = Fixture::new();
        let storefront = fixture.mount().await;
        storefront.user.sign_out();

        let err = CheckoutPage::new(&storefront)
            .place_order(Some(PaymentMethod::CashOnDelivery), None)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::SignedOut);
    }

    #[tokio::test]
    async fn test_place_order_empty_cart() {
        let fixture = Fixture::new();
        let storefront = fixture.mount().await;
        storefront
            .cart
            .dispatch(crate::domains::cart::CartAction::GetCartSuccess(Vec::new()));

        let err = CheckoutPage::new(&storefront)
            .place_order(Some(PaymentMethod::Card), None)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Your cart is empty");
    }

    #[tokio::test]
    async fn test_place_order() {
        let fixture = Fixture::new();
        let storefront = fixture.mount().await;
        storefront.user.select_address(Some(AddressId::new("home")));
        let cart_calls = fixture.cart.calls();

        let order = CheckoutPage::new(&storefront)
            .place_order(Some(PaymentMethod::Card), Some("Leave at the door".into()))
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.total_price, Money::usd(860));
        assert_eq!(order.address.id, AddressId::new("home"));
        assert_eq!(order.notes.as_deref(), Some("Leave at the door"));

        let orders = storefront.orders.state();
        assert!(Arc::ptr_eq(&orders.orders.collection[0], &order));
        assert_eq!(fixture.cart.calls(), cart_calls + 1);
        assert_eq!(
            fixture.notifier.notices().last().map(|n| n.message().to_string()).as_deref(),
            Some("Your order has been placed")
        );
    }
}
