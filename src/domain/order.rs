use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::promo::PromoCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Scheduled => "SCHEDULED",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Work moves forward one step at a time; any open order may be cancelled.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (from, Cancelled) => !from.is_terminal(),
            (Pending, Scheduled) | (Scheduled, InProgress) | (InProgress, Completed) => true,
            _ => false,
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "SCHEDULED" => Ok(OrderStatus::Scheduled),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::InvalidInput(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "UNPAID",
            PaymentStatus::Paid => "PAID",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNPAID" => Ok(PaymentStatus::Unpaid),
            "PAID" => Ok(PaymentStatus::Paid),
            other => Err(DomainError::InvalidInput(format!(
                "unknown payment status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: Uuid,
    pub service_id: Uuid,
    pub quantity: i32,
    /// Unit price copied from the service when the order was placed.
    pub price_at_order: BigDecimal,
}

impl OrderItem {
    pub fn line_total(&self) -> BigDecimal {
        &self.price_at_order * BigDecimal::from(self.quantity)
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    /// Opaque order code.
    pub id: Uuid,
    pub client_id: Uuid,
    pub address: String,
    pub work_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// Cached result of [`calculate_total`] as of the last save.
    pub total_amount: BigDecimal,
    pub created_by: Option<Uuid>,
    pub assigned_staff: Vec<Uuid>,
    pub promo_code: Option<PromoCode>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn subtotal(&self) -> BigDecimal {
        subtotal(&self.items)
    }

    pub fn recalculated_total(&self) -> BigDecimal {
        calculate_total(&self.items, self.promo_code.as_ref())
    }
}

pub fn subtotal(items: &[OrderItem]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::zero(), |acc, item| acc + item.line_total())
}

/// Order total: item subtotal minus the promo discount, never below zero.
///
/// The promo is applied as stored on the order; its validity window is only
/// checked when the code is selected.
pub fn calculate_total(items: &[OrderItem], promo: Option<&PromoCode>) -> BigDecimal {
    let subtotal = subtotal(items);
    let total = match promo {
        Some(promo) => {
            let discount = promo.discount_on(&subtotal);
            subtotal - discount
        }
        None => subtotal,
    };
    let total = if total < BigDecimal::zero() {
        BigDecimal::zero()
    } else {
        total
    };
    total.with_scale_round(2, RoundingMode::HalfUp)
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub service_id: Uuid,
    pub quantity: i32,
    pub price_at_order: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub client_id: Uuid,
    pub address: String,
    pub work_date: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub promo_code_id: Option<Uuid>,
    pub items: Vec<NewOrderItem>,
    /// Instant the promo must still be valid at when the order is stored.
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<Order>,
    pub total: i64,
}
