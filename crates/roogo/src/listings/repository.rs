use super::domain::{ListingId, ListingRecord, OwnerId};
use crate::policy::Pagination;

/// Storage abstraction so the listing service can be exercised without a database.
pub trait ListingRepository: Send + Sync {
    fn insert(&self, record: ListingRecord) -> Result<ListingRecord, RepositoryError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<ListingRecord>, RepositoryError>;
    fn count_for_owner(&self, owner: &OwnerId) -> Result<usize, RepositoryError>;
    /// Owner's listings, newest first.
    fn page_for_owner(
        &self,
        owner: &OwnerId,
        page: &Pagination,
    ) -> Result<Vec<ListingRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
