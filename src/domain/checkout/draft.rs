use crate::domain::address::{Address, AddressBook};
use crate::domain::cart::{Cart, CartLine};
use crate::domain::delivery::DeliveryOptions;
use crate::domain::ids::{CustomerId, OrderId};
use crate::domain::order::{Order, OrderCommand, OrderLine};
use crate::domain::pricing::{OrderPricing, PricingPolicy};
use crate::error::{CheckoutError, CheckoutResult};

// ============================================================================
// Order Draft - Checkout steps
// ============================================================================
//
//   from_cart -> ship_to -> with_delivery -> review -> confirm
//
// The draft copies what it needs at each step, so later edits to the cart or
// address book do not leak into an order already under review.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct OrderDraft {
    customer_id: CustomerId,
    lines: Vec<CartLine>,
    address: Option<Address>,
    delivery: DeliveryOptions,
}

impl OrderDraft {
    pub fn from_cart(customer_id: CustomerId, cart: &Cart) -> CheckoutResult<Self> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            customer_id,
            lines: cart.lines().to_vec(),
            address: None,
            delivery: DeliveryOptions::default(),
        })
    }

    /// Ship to the address currently selected in `book`
    pub fn ship_to(mut self, book: &AddressBook) -> CheckoutResult<Self> {
        let address = book.selected().ok_or(CheckoutError::NoAddress)?;
        self.address = Some(address.clone());
        Ok(self)
    }

    pub fn with_delivery(mut self, delivery: &DeliveryOptions) -> Self {
        self.delivery = delivery.clone();
        self
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn delivery(&self) -> &DeliveryOptions {
        &self.delivery
    }

    /// Price the draft. Requires a shipping address.
    pub fn review(self, policy: &PricingPolicy) -> CheckoutResult<OrderReview> {
        let address = self.address.ok_or(CheckoutError::NoAddress)?;
        let pricing = policy.price(&self.lines, &self.delivery);

        Ok(OrderReview {
            customer_id: self.customer_id,
            lines: self.lines,
            address,
            delivery: self.delivery,
            pricing,
        })
    }
}

/// A fully priced draft, ready to become an order
#[derive(Debug, Clone)]
pub struct OrderReview {
    customer_id: CustomerId,
    lines: Vec<CartLine>,
    address: Address,
    delivery: DeliveryOptions,
    pricing: OrderPricing,
}

impl OrderReview {
    pub fn pricing(&self) -> &OrderPricing {
        &self.pricing
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn delivery(&self) -> &DeliveryOptions {
        &self.delivery
    }

    /// Freeze the review into a pending order with a fresh id
    pub fn confirm(self) -> CheckoutResult<Order> {
        let command = OrderCommand::PlaceOrder {
            order_id: OrderId::generate(),
            customer_id: self.customer_id,
            lines: self.lines.iter().map(OrderLine::from).collect(),
            address_id: self.address.id,
            delivery: self.delivery,
            pricing: self.pricing,
        };

        Ok(Order::place(&command)?)
    }
}

/// Price the current cart against the selected address and delivery choices
pub fn compute_order(
    cart: &Cart,
    addresses: &AddressBook,
    options: &DeliveryOptions,
    policy: &PricingPolicy,
) -> CheckoutResult<OrderPricing> {
    let review = OrderDraft::from_cart(addresses.owner(), cart)?
        .ship_to(addresses)?
        .with_delivery(options)
        .review(policy)?;

    Ok(*review.pricing())
}

// ============================================================================
// Unit Tests
// ============================================================================
