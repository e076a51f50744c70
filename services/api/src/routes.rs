use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use roogo::listings::interdictions::registry;
use roogo::listings::{all_tiers, listing_router, ListingRepository, ListingService};
use roogo::payments::{payment_router, PaymentGateway, PaymentService};
use roogo::policy::{BOOST_OPTIONS, LOCK_POLICY};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_domain_routes<R, G>(
    listings: Arc<ListingService<R>>,
    payments: Arc<PaymentService<G>>,
) -> axum::Router
where
    R: ListingRepository + 'static,
    G: PaymentGateway + 'static,
{
    listing_router(listings)
        .merge(payment_router(payments))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/tiers", axum::routing::get(tiers_endpoint))
        .route(
            "/api/v1/interdictions",
            axum::routing::get(interdictions_endpoint),
        )
        .route("/api/v1/pricing", axum::routing::get(pricing_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn tiers_endpoint() -> Json<serde_json::Value> {
    Json(json!({ "tiers": all_tiers() }))
}

pub(crate) async fn interdictions_endpoint() -> Json<serde_json::Value> {
    Json(json!({ "interdictions": registry() }))
}

pub(crate) async fn pricing_endpoint() -> Json<serde_json::Value> {
    let listing_fees: Vec<_> = all_tiers()
        .iter()
        .map(|tier| json!({ "tier": tier.id, "fee": tier.base_fee }))
        .collect();

    Json(json!({
        "currency": "XOF",
        "listing": listing_fees,
        "boosts": BOOST_OPTIONS,
        "lock": LOCK_POLICY,
    }))
}
