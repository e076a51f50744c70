use metrics_exporter_prometheus::PrometheusHandle;
use roogo::listings::{ListingId, ListingRecord, ListingRepository, OwnerId, RepositoryError};
use roogo::payments::{GatewayError, GatewayReceipt, PaymentGateway, PaymentInitiateInput};
use roogo::policy::Pagination;
use roogo::validation::Choice;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingRepository {
    records: Arc<Mutex<HashMap<ListingId, ListingRecord>>>,
}

impl ListingRepository for InMemoryListingRepository {
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
        let mut owned: Vec<&ListingRecord> = guard
            .values()
            .filter(|record| &record.owner == owner)
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect())
    }
}

/// Gateway that acknowledges every request without contacting an operator.
#[derive(Default)]
pub(crate) struct SandboxPaymentGateway {
    sequence: AtomicU64,
}

impl PaymentGateway for SandboxPaymentGateway {
    fn initiate(&self, request: &PaymentInitiateInput) -> Result<GatewayReceipt, GatewayError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let provider_reference = format!("SBX-{}-{id:06}", request.provider.as_str());
        info!(%provider_reference, "sandbox gateway acknowledged payment");
        Ok(GatewayReceipt { provider_reference })
    }
}
