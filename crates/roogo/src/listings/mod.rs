//! Listing intake: the validation schema, tier entitlements, and interdiction labels
//! that a listing passes through before it is stored.

pub mod domain;
pub mod interdictions;
pub mod repository;
pub mod router;
pub mod schema;
pub mod service;
pub mod tiers;

#[cfg(test)]
mod tests;

pub use domain::{ListingId, ListingInput, ListingRecord, OwnerId, PropertyType, RentPeriod};
pub use interdictions::{label_of, labels_of, Interdiction};
pub use repository::{ListingRepository, RepositoryError};
pub use router::{listing_router, CreateListingRequest};
pub use schema::validate_listing;
pub use service::{ListingService, ListingServiceError};
pub use tiers::{all_tiers, tier_config, ListingUsage, MediaPlan, Tier, TierId};
