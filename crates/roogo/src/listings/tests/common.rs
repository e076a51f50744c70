use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::listings::domain::{ListingId, ListingRecord, OwnerId};
use crate::listings::repository::{ListingRepository, RepositoryError};
use crate::listings::service::ListingService;
use crate::listings::tiers::TierId;
use crate::policy::Pagination;

pub(super) fn minimal_listing() -> Value {
    json!({
        "title": "A",
        "price": 10,
        "quartier": "Q",
        "city": "C",
        "address": "Addr",
        "property_type": "apartment",
    })
}

pub(super) fn full_listing() -> Value {
    json!({
        "title": "Villa meublée à Ouaga 2000",
        "price": 450000,
        "quartier": "Ouaga 2000",
        "city": "Ouagadougou",
        "address": "Rue 15.120, porte 42",
        "property_type": "villa",
        "period": "month",
        "bedrooms": 4,
        "bathrooms": 3,
        "parking_spaces": 2,
        "area": 320.5,
        "tier_id": "premium",
        "description": "Grande cour, groupe électrogène, gardiennage.",
        "amenities": ["climatisation", "forage", "gardien"],
        "interdictions": ["no_fumeurs", "no_animaux"],
    })
}

pub(super) fn owner() -> OwnerId {
    OwnerId("user_2abc".to_string())
}

pub(super) fn build_service() -> (ListingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ListingService::new(repository.clone(), TierId::Essentiel);
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ListingId, ListingRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ListingRepository for MemoryRepository {
    fn insert(&self, record: ListingRecord) -> Result<ListingRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<ListingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn count_for_owner(&self, owner: &OwnerId) -> Result<usize, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().filter(|record| &record.owner == owner).count())
    }

    fn page_for_owner(
        &self,
        owner: &OwnerId,
        page: &Pagination,
    ) -> Result<Vec<ListingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<ListingRecord> = guard
            .values()
            .filter(|record| &record.owner == owner)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect())
    }
}

/// Memory repository whose owner count takes a few milliseconds, like a database round trip.
#[derive(Default, Clone)]
pub(super) struct SlowCountRepository {
    pub(super) inner: MemoryRepository,
}

impl ListingRepository for SlowCountRepository {
    fn insert(&self, record: ListingRecord) -> Result<ListingRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<ListingRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn count_for_owner(&self, owner: &OwnerId) -> Result<usize, RepositoryError> {
        std::thread::sleep(std::time::Duration::from_millis(5));
        self.inner.count_for_owner(owner)
    }

    fn page_for_owner(
        &self,
        owner: &OwnerId,
        page: &Pagination,
    ) -> Result<Vec<ListingRecord>, RepositoryError> {
        self.inner.page_for_owner(owner, page)
    }
}

pub(super) struct UnavailableRepository;

impl ListingRepository for UnavailableRepository {
    fn insert(&self, _record: ListingRecord) -> Result<ListingRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ListingId) -> Result<Option<ListingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn count_for_owner(&self, _owner: &OwnerId) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn page_for_owner(
        &self,
        _owner: &OwnerId,
        _page: &Pagination,
    ) -> Result<Vec<ListingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
