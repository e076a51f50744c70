use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::{json, Value};

use super::gateway::{GatewayError, PaymentGateway};
use super::service::{PaymentService, PaymentServiceError};

pub fn payment_router<G>(service: Arc<PaymentService<G>>) -> Router
where
    G: PaymentGateway + 'static,
{
    Router::new()
        .route("/api/v1/payments/initiate", post(initiate_handler::<G>))
        .with_state(service)
}

pub(crate) async fn initiate_handler<G>(
    State(service): State<Arc<PaymentService<G>>>,
    axum::Json(raw): axum::Json<Value>,
) -> Response
where
    G: PaymentGateway + 'static,
{
    match service.initiate(&raw) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(PaymentServiceError::Invalid(error)) => error.into_response(),
        Err(PaymentServiceError::RateLimited(limited)) => {
            let payload = json!({
                "error": limited.to_string(),
                "retry_after_secs": limited.retry_after.as_secs(),
            });
            (StatusCode::TOO_MANY_REQUESTS, axum::Json(payload)).into_response()
        }
        Err(PaymentServiceError::Gateway(error @ GatewayError::Declined(_))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(PaymentServiceError::Gateway(error @ GatewayError::Unavailable(_))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
