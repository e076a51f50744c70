use serde::{Deserialize, Serialize};

use crate::validation::{Choice, FieldIssue, ValidationError, Violation};

/// Pricing and feature bundle selectable when publishing a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierId {
    Essentiel,
    Standard,
    Premium,
}

impl Choice for TierId {
    const ALL: &'static [Self] = &[TierId::Essentiel, TierId::Standard, TierId::Premium];
    const NAMES: &'static [&'static str] = &["essentiel", "standard", "premium"];

    fn as_str(self) -> &'static str {
        match self {
            TierId::Essentiel => "essentiel",
            TierId::Standard => "standard",
            TierId::Premium => "premium",
        }
    }
}

/// Entitlements and activation fee for a tier. Fees are in XOF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tier {
    pub id: TierId,
    pub photo_limit: u32,
    pub slot_limit: u32,
    pub video_included: bool,
    pub open_house_limit: u32,
    pub base_fee: u32,
    pub has_badge: bool,
}

static TIERS: [Tier; 3] = [
    Tier {
        id: TierId::Essentiel,
        photo_limit: 5,
        slot_limit: 1,
        video_included: false,
        open_house_limit: 0,
        base_fee: 2_500,
        has_badge: false,
    },
    Tier {
        id: TierId::Standard,
        photo_limit: 10,
        slot_limit: 3,
        video_included: true,
        open_house_limit: 1,
        base_fee: 5_000,
        has_badge: false,
    },
    Tier {
        id: TierId::Premium,
        photo_limit: 20,
        slot_limit: 5,
        video_included: true,
        open_house_limit: 3,
        base_fee: 10_000,
        has_badge: true,
    },
];

pub fn tier_config(id: TierId) -> &'static Tier {
    match id {
        TierId::Essentiel => &TIERS[0],
        TierId::Standard => &TIERS[1],
        TierId::Premium => &TIERS[2],
    }
}

/// Every tier, cheapest first.
pub fn all_tiers() -> &'static [Tier] {
    &TIERS
}

/// Media a listing intends to publish, as declared by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPlan {
    #[serde(default)]
    pub photos: u32,
    #[serde(default)]
    pub video: bool,
    #[serde(default)]
    pub open_houses: u32,
}

/// Resources a new listing would consume, checked against a tier before activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingUsage {
    pub photos: u32,
    pub has_video: bool,
    pub open_houses: u32,
    /// Listings the owner already has active, excluding the one being created.
    pub active_listings: u32,
}

impl ListingUsage {
    pub fn from_plan(plan: MediaPlan, active_listings: u32) -> Self {
        Self {
            photos: plan.photos,
            has_video: plan.video,
            open_houses: plan.open_houses,
            active_listings,
        }
    }
}

impl Tier {
    /// Report every entitlement the usage would exceed.
    pub fn check_usage(&self, usage: &ListingUsage) -> Result<(), ValidationError> {
        let tier = self.id.as_str();
        let mut issues = Vec::new();

        if usage.photos > self.photo_limit {
            issues.push(FieldIssue::new(
                "photos",
                Violation::ExceedsEntitlement {
                    tier,
                    limit: self.photo_limit,
                },
            ));
        }

        if usage.has_video && !self.video_included {
            issues.push(FieldIssue::new("video", Violation::NotIncluded { tier }));
        }

        if usage.open_houses > self.open_house_limit {
            issues.push(FieldIssue::new(
                "open_houses",
                Violation::ExceedsEntitlement {
                    tier,
                    limit: self.open_house_limit,
                },
            ));
        }

        if usage.active_listings >= self.slot_limit {
            issues.push(FieldIssue::new(
                "slots",
                Violation::ExceedsEntitlement {
                    tier,
                    limit: self.slot_limit,
                },
            ));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }
}
