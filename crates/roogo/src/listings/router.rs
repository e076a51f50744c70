use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::domain::{ListingId, OwnerId};
use super::repository::{ListingRepository, RepositoryError};
use super::schema::validate_listing;
use super::service::{ListingService, ListingServiceError};
use super::tiers::MediaPlan;
use crate::policy::{PageQuery, Pagination};

/// Body accepted when creating a listing: the raw listing plus its declared media.
#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub listing: Value,
    #[serde(default)]
    pub media: MediaPlan,
}

/// Router builder exposing listing intake and lookup endpoints.
pub fn listing_router<R>(service: Arc<ListingService<R>>) -> Router
where
    R: ListingRepository + 'static,
{
    Router::new()
        .route("/api/v1/listings/validate", post(validate_handler))
        .route("/api/v1/listings/:listing_id", get(fetch_handler::<R>))
        .route(
            "/api/v1/owners/:owner_id/listings",
            post(create_handler::<R>).get(owner_listings_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn validate_handler(axum::Json(raw): axum::Json<Value>) -> Response {
    match validate_listing(&raw) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(owner_id): Path<String>,
    axum::Json(request): axum::Json<CreateListingRequest>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.create(OwnerId(owner_id), &request.listing, request.media) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let Ok(id) = Uuid::parse_str(&listing_id) else {
        let payload = json!({ "error": "listing id must be a UUID" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    match service.get(&ListingId(id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn owner_listings_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(owner_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let page = Pagination::from(query);
    match service.list_for_owner(&OwnerId(owner_id), &page) {
        Ok(listings) => {
            let payload = json!({
                "page": page.page(),
                "per_page": page.per_page(),
                "listings": listings,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ListingServiceError) -> Response {
    match error {
        ListingServiceError::Invalid(error) => error.into_response(),
        ListingServiceError::Entitlement(error) => {
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(error)).into_response()
        }
        ListingServiceError::RateLimited(limited) => {
            let payload = json!({
                "error": limited.to_string(),
                "retry_after_secs": limited.retry_after.as_secs(),
            });
            (StatusCode::TOO_MANY_REQUESTS, axum::Json(payload)).into_response()
        }
        ListingServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "listing not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ListingServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "listing already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
