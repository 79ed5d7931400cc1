//! Order handlers
//!
//! Thin wrappers around `OrderService`; all the interesting behavior
//! happens in the chaos interceptor before these run.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{Order, OrderId};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Order placement request
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    /// Customer placing the order
    pub customer: String,
    /// Item being ordered
    pub item: String,
    /// Quantity ordered
    pub quantity: u32,
}

/// Place a new order
#[instrument(skip(state, request), fields(customer = %request.customer))]
pub async fn place_order(
    State(state): State<AppState>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state
        .orders
        .place(&request.customer, &request.item, request.quantity)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Capture payment for an order
#[instrument(skip(state))]
pub async fn pay_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.pay(OrderId::from_uuid(id))?))
}

/// Ship an order
#[instrument(skip(state))]
pub async fn ship_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.ship(OrderId::from_uuid(id))?))
}

/// Compensate a placement
#[instrument(skip(state))]
pub async fn rollback_place(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.rollback_place(OrderId::from_uuid(id))?))
}

/// Compensate a payment
#[instrument(skip(state))]
pub async fn rollback_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.rollback_payment(OrderId::from_uuid(id))?))
}

/// Compensate a shipment
#[instrument(skip(state))]
pub async fn rollback_ship(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.rollback_ship(OrderId::from_uuid(id))?))
}

/// Read an order's status
#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.get(OrderId::from_uuid(id))?))
}
