//! Shared numeric policy: paging, request rate limits, and boost/lock pricing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 48;

/// Requests allowed per key within a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

/// Listing creations allowed per owner.
pub const LISTING_CREATION_LIMIT: RateLimitPolicy = RateLimitPolicy {
    max_requests: 10,
    window: Duration::from_secs(60),
};

/// Payment initiations allowed per phone number.
pub const PAYMENT_INITIATION_LIMIT: RateLimitPolicy = RateLimitPolicy {
    max_requests: 5,
    window: Duration::from_secs(60),
};

/// Paid visibility extension for a listing. Fees are in XOF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoostOption {
    pub days: u32,
    pub fee: u32,
}

pub const BOOST_OPTIONS: [BoostOption; 3] = [
    BoostOption { days: 7, fee: 1_000 },
    BoostOption { days: 14, fee: 1_800 },
    BoostOption { days: 30, fee: 3_500 },
];

/// Reservation hold placed on a listing by a prospective tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockPolicy {
    pub duration_hours: u32,
    pub extension_window_hours: u32,
    pub fee: u32,
}

pub const LOCK_POLICY: LockPolicy = LockPolicy {
    duration_hours: 48,
    extension_window_hours: 24,
    fee: 2_000,
};

/// Page query as received from clients; both parameters are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// 1-based page window clamped to the allowed page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Pagination {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> usize {
        let skipped = usize::try_from(self.page - 1).unwrap_or(usize::MAX);
        skipped.saturating_mul(self.limit())
    }

    pub fn limit(&self) -> usize {
        self.per_page as usize
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl From<PageQuery> for Pagination {
    fn from(query: PageQuery) -> Self {
        Self::new(query.page, query.per_page)
    }
}
