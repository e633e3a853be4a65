//! Proptest generators for property-based testing.

use proptest::prelude::*;

use marketplace_cart_core::{CartState, NewItem};

/// Generate a product id from a small pool, so operations collide often.
pub fn product_id() -> impl Strategy<Value = String> {
    (0u8..8).prop_map(|n| format!("p{n}"))
}

/// Generate a price in whole cents.
pub fn price() -> impl Strategy<Value = f64> {
    (0i64..10_000_000).prop_map(|cents| cents as f64 / 100.0)
}

/// Generate an item descriptor.
pub fn new_item() -> impl Strategy<Value = NewItem> {
    (product_id(), "[A-Za-z ]{1,24}", "https://img/[a-z0-9]{1,12}\\.png", price())
        .prop_map(|(id, title, image_url, price)| NewItem::new(id, title, image_url, price))
}

/// A cart operation, as issued by a UI.
#[derive(Debug, Clone)]
pub enum CartOp {
    Add(NewItem),
    Increment(String),
    Decrement(String),
}

impl CartOp {
    /// Apply the operation to a cart state.
    pub fn apply(&self, state: &CartState) -> CartState {
        match self {
            CartOp::Add(item) => state.with_added(item.clone()),
            CartOp::Increment(id) => state.with_incremented(id),
            CartOp::Decrement(id) => state.with_decremented(id),
        }
    }

    /// The product id the operation targets.
    pub fn id(&self) -> &str {
        match self {
            CartOp::Add(item) => &item.id,
            CartOp::Increment(id) | CartOp::Decrement(id) => id,
        }
    }
}

impl Arbitrary for CartOp {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            new_item().prop_map(CartOp::Add),
            product_id().prop_map(CartOp::Increment),
            product_id().prop_map(CartOp::Decrement),
        ]
        .boxed()
    }
}

/// Generate a sequence of cart operations.
pub fn cart_ops(max_len: usize) -> impl Strategy<Value = Vec<CartOp>> {
    prop::collection::vec(any::<CartOp>(), 0..=max_len)
}

/// Generate a reachable cart state by replaying random operations.
pub fn cart_state() -> impl Strategy<Value = CartState> {
    cart_ops(48).prop_map(|ops| replay(&ops))
}

/// Replay operations onto an empty cart.
pub fn replay(ops: &[CartOp]) -> CartState {
    ops.iter()
        .fold(CartState::new(), |state, op| op.apply(&state))
}
