//! OpenAPI document of the payment service.

use axum::Json;
use utoipa::OpenApi;

use super::payments;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payment Service API",
        description = "REST API for processing payments",
        version = "1.0.0",
        contact(name = "Payment Service Team", email = "payment-service@example.com"),
        license(name = "Apache 2.0", url = "https://www.apache.org/licenses/LICENSE-2.0")
    ),
    paths(payments::create, payments::get, payments::for_order, payments::list),
    tags((name = "payments", description = "Payment processing and lookup"))
)]
pub struct PaymentApiDoc;

/// GET /openapi.json: the payment service API description.
pub async fn payment_document() -> Json<utoipa::openapi::OpenApi> {
    Json(PaymentApiDoc::openapi())
}
