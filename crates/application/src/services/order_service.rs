//! Order use cases backed by an in-memory store
//!
//! No persistence: orders live in a process-local map and are gone on
//! restart, which is all the saga test harnesses driving this service need.

use std::collections::HashMap;

use domain::{DomainError, Order, OrderId};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::ApplicationError;

/// In-memory order store and the place/pay/ship/rollback use cases
#[derive(Debug, Default)]
pub struct OrderService {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl OrderService {
    /// Create an empty order service
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new order
    pub fn place(
        &self,
        customer: &str,
        item: &str,
        quantity: u32,
    ) -> Result<Order, ApplicationError> {
        if customer.trim().is_empty() {
            return Err(DomainError::ValidationError("customer must not be empty".to_string()).into());
        }
        if item.trim().is_empty() {
            return Err(DomainError::ValidationError("item must not be empty".to_string()).into());
        }
        if quantity == 0 {
            return Err(DomainError::ValidationError("quantity must be positive".to_string()).into());
        }

        let order = Order::place(customer, item, quantity);
        debug!(order_id = %order.id, customer, "order placed");
        self.orders.write().insert(order.id, order.clone());
        Ok(order)
    }

    /// Capture payment for an order
    pub fn pay(&self, id: OrderId) -> Result<Order, ApplicationError> {
        self.with_order(id, Order::pay)
    }

    /// Ship an order
    pub fn ship(&self, id: OrderId) -> Result<Order, ApplicationError> {
        self.with_order(id, Order::ship)
    }

    /// Compensate a placement
    pub fn rollback_place(&self, id: OrderId) -> Result<Order, ApplicationError> {
        self.with_order(id, Order::rollback_place)
    }

    /// Compensate a payment
    pub fn rollback_payment(&self, id: OrderId) -> Result<Order, ApplicationError> {
        self.with_order(id, Order::rollback_payment)
    }

    /// Compensate a shipment
    pub fn rollback_ship(&self, id: OrderId) -> Result<Order, ApplicationError> {
        self.with_order(id, Order::rollback_ship)
    }

    /// Look up an order by ID
    pub fn get(&self, id: OrderId) -> Result<Order, ApplicationError> {
        self.orders
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Order", id.to_string()).into())
    }

    /// Number of orders currently tracked
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }

    fn with_order(
        &self,
        id: OrderId,
        mutate: impl FnOnce(&mut Order) -> Result<(), DomainError>,
    ) -> Result<Order, ApplicationError> {
        let mut orders = self.orders.write();
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Order", id.to_string()))?;
        mutate(order)?;
        debug!(order_id = %id, status = %order.status, "order transitioned");
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use domain::OrderStatus;

    use super::*;

    #[test]
    fn place_stores_the_order() {
        let service = OrderService::new();
        let order = service.place("alice", "widget", 2).unwrap();
        let fetched = service.get(order.id).unwrap();
        assert_eq!(fetched.status, OrderStatus::Placed);
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn place_rejects_empty_customer() {
        let service = OrderService::new();
        let err = service.place("  ", "widget", 1).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::ValidationError(_))
        ));
        assert!(service.is_empty());
    }

    #[test]
    fn place_rejects_zero_quantity() {
        let service = OrderService::new();
        assert!(service.place("alice", "widget", 0).is_err());
    }

    #[test]
    fn pay_and_ship_flow() {
        let service = OrderService::new();
        let order = service.place("bob", "gadget", 1).unwrap();
        assert_eq!(service.pay(order.id).unwrap().status, OrderStatus::Paid);
        assert_eq!(service.ship(order.id).unwrap().status, OrderStatus::Shipped);
    }

    #[test]
    fn pay_unknown_order_is_not_found() {
        let service = OrderService::new();
        let err = service.pay(OrderId::new()).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn rollback_chain() {
        let service = OrderService::new();
        let order = service.place("carol", "thing", 5).unwrap();
        service.pay(order.id).unwrap();
        service.ship(order.id).unwrap();
        assert_eq!(
            service.rollback_ship(order.id).unwrap().status,
            OrderStatus::Paid
        );
        assert_eq!(
            service.rollback_payment(order.id).unwrap().status,
            OrderStatus::Placed
        );
        assert_eq!(
            service.rollback_place(order.id).unwrap().status,
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn invalid_transition_leaves_order_unchanged() {
        let service = OrderService::new();
        let order = service.place("dave", "widget", 1).unwrap();
        assert!(service.ship(order.id).is_err());
        assert_eq!(service.get(order.id).unwrap().status, OrderStatus::Placed);
    }
}
