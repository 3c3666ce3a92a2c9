//! Payment endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::OrderId;
use payments::{Page, PageRequest, Payment, PaymentProcessor, PaymentRepository, ProcessPayment};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::parse_id;
use crate::error::ApiError;

/// Shared state of the payment service.
pub struct PaymentAppState<R: PaymentRepository> {
    pub processor: PaymentProcessor<R>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessPaymentRequest {
    pub order_id: OrderId,
    pub amount: f64,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page number.
    pub page: Option<u32>,
    /// Page size, clamped to 1..=100.
    pub size: Option<u32>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        let defaults = PageRequest::default();
        PageRequest::new(
            params.page.unwrap_or(defaults.page()),
            params.size.unwrap_or(defaults.size()),
        )
    }
}

/// POST /payments: process a payment.
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = ProcessPaymentRequest,
    responses(
        (status = 201, description = "Payment processed", body = Payment),
        (status = 400, description = "Invalid amount or unreadable body"),
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn create<R: PaymentRepository + 'static>(
    State(state): State<Arc<PaymentAppState<R>>>,
    payload: Result<Json<ProcessPaymentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let Json(req) = payload?;
    let payment = state
        .processor
        .process(ProcessPayment::new(req.order_id, req.amount))
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /payments/{id}: load a payment by id.
#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "payments",
    params(("id" = i64, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment found", body = Payment),
        (status = 404, description = "No payment with this id"),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get<R: PaymentRepository + 'static>(
    State(state): State<Arc<PaymentAppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    let payment = state.processor.get_payment(parse_id(&id)?).await?;
    Ok(Json(payment))
}

/// GET /payments/order/{order_id}: load the latest payment of an order.
#[utoipa::path(
    get,
    path = "/payments/order/{order_id}",
    tag = "payments",
    params(("order_id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Latest payment of the order", body = Payment),
        (status = 404, description = "No payment for this order"),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn for_order<R: PaymentRepository + 'static>(
    State(state): State<Arc<PaymentAppState<R>>>,
    Path(order_id): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    let payment = state
        .processor
        .get_payment_for_order(parse_id(&order_id)?)
        .await?;
    Ok(Json(payment))
}

/// GET /payments?page=&size=: list payments one page at a time.
#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    params(PageParams),
    responses((status = 200, description = "One page of payments", body = Page<Payment>))
)]
#[tracing::instrument(skip(state, params))]
pub async fn list<R: PaymentRepository + 'static>(
    State(state): State<Arc<PaymentAppState<R>>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<Payment>>, ApiError> {
    let Query(params) = params?;
    Ok(Json(state.processor.list_payments(params.into()).await?))
}
