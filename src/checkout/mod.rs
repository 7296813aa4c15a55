//! The bundled checkout organizer behind the `stepwise` binary.
//!
//! [`PlaceOrder`] declares four steps against an [`Order`]:
//!
//! | step             | filter           |
//! |------------------|------------------|
//! | `validate_order` |                  |
//! | `charge_card`    |                  |
//! | `gift_wrap`      | `if: gift_wrap`  |
//! | `send_receipt`   | `unless: quiet`  |
//!
//! A declined card stops the run before the order is wrapped or a receipt
//! is sent.

mod steps;


use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::Result;
use crate::filter::Capabilities;
use crate::organizer::Organizer;
use crate::sequence::{RunSummary, StepOptions, StepSequence};

pub use steps::{ChargeCard, GiftWrap, SendReceipt, ValidateOrder};

/// Price of one item, in cents.
pub const UNIT_PRICE_CENTS: u64 = 1_250;

/// Surcharge for gift wrapping, in cents.
pub const GIFT_WRAP_CENTS: u64 = 300;

static DECLARED: OnceCell<()> = OnceCell::new();

/// The order built up by a checkout run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    /// Items being ordered.
    pub items: Vec<String>,
    /// Whether the card on file will be declined.
    pub card_declined: bool,
    /// Running total, in cents.
    pub total_cents: u64,
    /// Set once the card has been charged.
    pub charged: bool,
    /// Set once the order has been gift-wrapped.
    pub gift_wrapped: bool,
    /// The receipt sent to the customer, if any.
    pub receipt: Option<String>,
}

impl Order {
    /// An order for `items`.
    #[must_use]
    pub fn new<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// The checkout organizer; its fields answer the `gift_wrap` and `quiet`
/// filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaceOrder {
    /// Gift-wrap the order.
    pub gift_wrap: bool,
    /// Do not send a receipt.
    pub quiet: bool,
}

impl Capabilities for PlaceOrder {
    fn capability(&self, name: &str) -> Option<bool> {
        match name {
            "gift_wrap" => Some(self.gift_wrap),
            "quiet" => Some(self.quiet),
            _ => None,
        }
    }
}

impl Organizer for PlaceOrder {
    type Context = Order;

    fn kind_name() -> &'static str {
        "PlaceOrder"
    }
}

impl PlaceOrder {
    /// Declares the checkout steps once and runs them against `order`.
    ///
    /// # Errors
    ///
    /// Returns the failing step's error, for example a declined card.
    pub fn place(&self, order: &mut Order) -> Result<RunSummary> {
        install()?;
        self.run(order)
    }
}

/// Declares the checkout steps on first call; later calls do nothing.
///
/// # Errors
///
/// Returns [`DeclarationError::Sealed`](crate::error::DeclarationError)
/// when the kind was sealed before the steps could be declared.
pub fn install() -> Result<()> {
    DECLARED.get_or_try_init(|| declare().map(drop))?;
    Ok(())
}

/// The checkout steps as currently declared.
#[must_use]
pub fn declared_steps() -> Arc<StepSequence<Order, PlaceOrder>> {
    PlaceOrder::sequence()
}

fn declare() -> Result<Arc<StepSequence<Order, PlaceOrder>>> {
    PlaceOrder::declare([ValidateOrder::step(), ChargeCard::step()], |steps| {
        steps
            .run(GiftWrap::step(), StepOptions::new().when_named("gift_wrap"))
            .run(SendReceipt::step(), StepOptions::new().unless_named("quiet"));
    })
}
