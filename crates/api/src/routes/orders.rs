//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use orders::{CreateOrder, Order, OrderRepository, OrderService, PaymentClient, TransactionResponse};
use serde::Deserialize;

use super::parse_id;
use crate::error::ApiError;

/// Shared state of the order service.
pub struct OrderAppState<R: OrderRepository, C: PaymentClient> {
    pub order_service: OrderService<R, C>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub order_number: Option<String>,
    pub price: f64,
}

/// POST /orders: place an order and settle its payment.
#[tracing::instrument(skip(state, payload))]
pub async fn create<R, C>(
    State(state): State<Arc<OrderAppState<R, C>>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError>
where
    R: OrderRepository + 'static,
    C: PaymentClient + 'static,
{
    let Json(req) = payload?;
    let cmd = CreateOrder {
        order_number: req.order_number,
        price: req.price,
    };
    let response = state.order_service.place_order(cmd).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /orders/{id}: load an order by id.
#[tracing::instrument(skip(state))]
pub async fn get<R, C>(
    State(state): State<Arc<OrderAppState<R, C>>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError>
where
    R: OrderRepository + 'static,
    C: PaymentClient + 'static,
{
    let order = state.order_service.get_order(parse_id(&id)?).await?;
    Ok(Json(order))
}

/// GET /orders: list every order.
#[tracing::instrument(skip(state))]
pub async fn list<R, C>(
    State(state): State<Arc<OrderAppState<R, C>>>,
) -> Result<Json<Vec<Order>>, ApiError>
where
    R: OrderRepository + 'static,
    C: PaymentClient + 'static,
{
    Ok(Json(state.order_service.list_orders().await?))
}
