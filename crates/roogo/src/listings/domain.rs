use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tiers::TierId;
use crate::validation::Choice;

/// Identifier assigned to a stored listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub Uuid);

impl ListingId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Account that owns a listing, as resolved by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Villa,
    Studio,
    Commercial,
}

impl Choice for PropertyType {
    const ALL: &'static [Self] = &[
        PropertyType::House,
        PropertyType::Apartment,
        PropertyType::Villa,
        PropertyType::Studio,
        PropertyType::Commercial,
    ];
    const NAMES: &'static [&'static str] = &["house", "apartment", "villa", "studio", "commercial"];

    fn as_str(self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Villa => "villa",
            PropertyType::Studio => "studio",
            PropertyType::Commercial => "commercial",
        }
    }
}

/// Billing period the advertised rent refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentPeriod {
    Month,
    Year,
}

impl Choice for RentPeriod {
    const ALL: &'static [Self] = &[RentPeriod::Month, RentPeriod::Year];
    const NAMES: &'static [&'static str] = &["month", "year"];

    fn as_str(self) -> &'static str {
        match self {
            RentPeriod::Month => "month",
            RentPeriod::Year => "year",
        }
    }
}

/// Normalized listing payload produced by `validate_listing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingInput {
    pub title: String,
    pub price: f64,
    pub quartier: String,
    pub city: String,
    pub address: String,
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<RentPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_spaces: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<TierId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interdictions: Option<Vec<String>>,
}

/// Stored listing with its resolved tier, fee, and restriction labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: ListingId,
    pub owner: OwnerId,
    pub listing: ListingInput,
    pub tier: TierId,
    pub activation_fee: u32,
    pub has_badge: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interdiction_labels: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}
