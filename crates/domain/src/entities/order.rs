//! Order entity - state-flag bookkeeping for the demo saga flow
//!
//! Orders move forward through place → pay → ship and can be rolled back
//! one step at a time. Each rollback endpoint undoes exactly one forward
//! transition, which is what a Saga compensation step looks like from the
//! outside.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::OrderId;

/// Status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed - created, not yet paid
    Placed,
    /// Paid - payment captured
    Paid,
    /// Shipped - handed to the carrier
    Shipped,
    /// Cancelled - placement was rolled back
    Cancelled,
}

impl OrderStatus {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Cancelled => "cancelled",
        }
    }

    /// Check if this status is terminal (no further transitions)
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,
    /// Customer placing the order
    pub customer: String,
    /// Item being ordered
    pub item: String,
    /// Quantity ordered
    pub quantity: u32,
    /// Current status
    pub status: OrderStatus,
    /// When this order was created
    pub created_at: DateTime<Utc>,
    /// When this order was last modified
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a newly placed order
    #[must_use]
    pub fn place(customer: impl Into<String>, item: impl Into<String>, quantity: u32) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            customer: customer.into(),
            item: item.into(),
            quantity,
            status: OrderStatus::Placed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Capture payment for a placed order
    pub fn pay(&mut self) -> Result<(), DomainError> {
        self.transition("pay", OrderStatus::Placed, OrderStatus::Paid)
    }

    /// Ship a paid order
    pub fn ship(&mut self) -> Result<(), DomainError> {
        self.transition("ship", OrderStatus::Paid, OrderStatus::Shipped)
    }

    /// Compensate a placement: cancel the order
    pub fn rollback_place(&mut self) -> Result<(), DomainError> {
        self.transition("rollback placement of", OrderStatus::Placed, OrderStatus::Cancelled)
    }

    /// Compensate a payment: return to placed
    pub fn rollback_payment(&mut self) -> Result<(), DomainError> {
        self.transition("rollback payment of", OrderStatus::Paid, OrderStatus::Placed)
    }

    /// Compensate a shipment: return to paid
    pub fn rollback_ship(&mut self) -> Result<(), DomainError> {
        self.transition("rollback shipment of", OrderStatus::Shipped, OrderStatus::Paid)
    }

    fn transition(
        &mut self,
        operation: &str,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<(), DomainError> {
        if self.status != from {
            return Err(DomainError::invalid_transition(operation, self.status.label()));
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}
