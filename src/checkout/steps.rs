//! Checkout steps.

use std::sync::Arc;

use crate::error::StepError;
use crate::step::{Step, StepRef};

use super::{GIFT_WRAP_CENTS, Order, UNIT_PRICE_CENTS};

/// Rejects empty orders and prices the items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOrder;

impl ValidateOrder {
    /// Shared handle to the step.
    #[must_use]
    pub fn step() -> StepRef<Order> {
        Arc::new(Self)
    }
}

impl Step<Order> for ValidateOrder {
    fn name(&self) -> &str {
        "validate_order"
    }

    fn call(&self, order: &mut Order) -> Result<(), StepError> {
        if order.items.iter().all(|item| item.trim().is_empty()) {
            return Err(StepError::failed(self.name(), "order has no items"));
        }
        order.total_cents = order.items.iter().map(|_| UNIT_PRICE_CENTS).sum();
        Ok(())
    }
}

/// Charges the card on file for the order total.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargeCard;

impl ChargeCard {
    /// Shared handle to the step.
    #[must_use]
    pub fn step() -> StepRef<Order> {
        Arc::new(Self)
    }
}

impl Step<Order> for ChargeCard {
    fn name(&self) -> &str {
        "charge_card"
    }

    fn call(&self, order: &mut Order) -> Result<(), StepError> {
        if order.card_declined {
            return Err(StepError::failed(self.name(), "card declined"));
        }
        order.charged = true;
        Ok(())
    }
}

/// Wraps the order and adds the wrapping surcharge.
#[derive(Debug, Clone, Copy, Default)]
pub struct GiftWrap;

impl GiftWrap {
    /// Shared handle to the step.
    #[must_use]
    pub fn step() -> StepRef<Order> {
        Arc::new(Self)
    }
}

impl Step<Order> for GiftWrap {
    fn name(&self) -> &str {
        "gift_wrap"
    }

    fn call(&self, order: &mut Order) -> Result<(), StepError> {
        order.gift_wrapped = true;
        order.total_cents = order.total_cents.saturating_add(GIFT_WRAP_CENTS);
        Ok(())
    }
}

/// Records the receipt sent to the customer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendReceipt;

impl SendReceipt {
    /// Shared handle to the step.
    #[must_use]
    pub fn step() -> StepRef<Order> {
        Arc::new(Self)
    }
}

impl Step<Order> for SendReceipt {
    fn name(&self) -> &str {
        "send_receipt"
    }

    fn call(&self, order: &mut Order) -> Result<(), StepError> {
        let wrapping = if order.gift_wrapped { ", gift-wrapped" } else { "" };
        order.receipt = Some(format!(
            "{} item(s){wrapping}, total {} cents",
            order.items.len(),
            order.total_cents
        ));
        Ok(())
    }
}
