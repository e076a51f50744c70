use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::domain::{ListingId, ListingRecord, OwnerId};
use super::interdictions::{labels_of, normalize_tag};
use super::repository::{ListingRepository, RepositoryError};
use super::schema::validate_listing;
use super::tiers::{tier_config, ListingUsage, MediaPlan, Tier, TierId};
use crate::policy::{Pagination, RateLimitPolicy, LISTING_CREATION_LIMIT};
use crate::ratelimit::{FixedWindowLimiter, RateLimited};
use crate::validation::ValidationError;

/// Service composing listing validation, tier entitlements, and storage.
pub struct ListingService<R> {
    repository: Arc<R>,
    default_tier: TierId,
    limiter: FixedWindowLimiter,
    owner_locks: Mutex<HashMap<OwnerId, Arc<Mutex<()>>>>,
}

impl<R> ListingService<R>
where
    R: ListingRepository + 'static,
{
    /// `default_tier` applies to listings submitted without a `tier_id`.
    pub fn new(repository: Arc<R>, default_tier: TierId) -> Self {
        Self::with_rate_limit(repository, default_tier, LISTING_CREATION_LIMIT)
    }

    pub fn with_rate_limit(
        repository: Arc<R>,
        default_tier: TierId,
        policy: RateLimitPolicy,
    ) -> Self {
        Self {
            repository,
            default_tier,
            limiter: FixedWindowLimiter::new(policy),
            owner_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn default_tier(&self) -> TierId {
        self.default_tier
    }

    /// Validate and store a new listing for `owner`.
    ///
    /// Creations for one owner are serialized so the slot count cannot be overshot by
    /// concurrent requests.
    pub fn create(
        &self,
        owner: OwnerId,
        raw: &Value,
        media: MediaPlan,
    ) -> Result<ListingRecord, ListingServiceError> {
        let mut listing = validate_listing(raw).map_err(|error| {
            warn!(owner = %owner.0, issues = error.issues().len(), "listing payload rejected");
            ListingServiceError::Invalid(error)
        })?;
        self.limiter.check(&owner.0)?;

        let tier_id = listing.tier_id.unwrap_or(self.default_tier);
        let tier = tier_config(tier_id);

        listing.interdictions = listing
            .interdictions
            .map(|tags| tags.iter().map(|tag| normalize_tag(tag)).collect());
        let interdiction_labels = labels_of(listing.interdictions.as_deref());

        let record = ListingRecord {
            id: ListingId::generate(),
            owner,
            listing,
            tier: tier_id,
            activation_fee: tier.base_fee,
            has_badge: tier.has_badge,
            interdiction_labels,
            created_at: Utc::now(),
        };

        let owner = record.owner.clone();
        let lock = self.owner_lock(&owner);
        let stored = {
            let _admission = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.insert_within_entitlements(record, tier, media)
        };
        self.release_owner_lock(&owner, lock);

        let stored = stored?;
        info!(
            listing_id = %stored.id.0,
            owner = %stored.owner.0,
            tier = ?stored.tier,
            "listing accepted"
        );
        Ok(stored)
    }

    /// Caller must hold the owner's admission lock.
    fn insert_within_entitlements(
        &self,
        record: ListingRecord,
        tier: &Tier,
        media: MediaPlan,
    ) -> Result<ListingRecord, ListingServiceError> {
        let active = self.repository.count_for_owner(&record.owner)?;
        let usage = ListingUsage::from_plan(media, u32::try_from(active).unwrap_or(u32::MAX));
        tier.check_usage(&usage)
            .map_err(ListingServiceError::Entitlement)?;

        Ok(self.repository.insert(record)?)
    }

    fn owner_lock(&self, owner: &OwnerId) -> Arc<Mutex<()>> {
        let mut locks = self
            .owner_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(owner.clone()).or_default())
    }

    fn release_owner_lock(&self, owner: &OwnerId, lock: Arc<Mutex<()>>) {
        let mut locks = self
            .owner_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Only the map and `lock` still point at it: nobody is waiting.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(owner);
        }
    }

    /// Owners with a creation in flight.
    pub fn pending_owners(&self) -> usize {
        self.owner_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn get(&self, id: &ListingId) -> Result<ListingRecord, ListingServiceError> {
        debug!(listing_id = %id.0, "fetching listing");
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list_for_owner(
        &self,
        owner: &OwnerId,
        page: &Pagination,
    ) -> Result<Vec<ListingRecord>, ListingServiceError> {
        Ok(self.repository.page_for_owner(owner, page)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Invalid(ValidationError),
    #[error("tier entitlement exceeded: {0}")]
    Entitlement(ValidationError),
    #[error(transparent)]
    RateLimited(#[from] RateLimited),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
