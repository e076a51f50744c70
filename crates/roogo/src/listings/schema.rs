use serde_json::Value;
use validator::Validate;

use super::domain::{ListingInput, PropertyType, RentPeriod};
use super::tiers::TierId;
use crate::validation::{FieldReader, ValidationError};

pub const TITLE_MAX_CHARS: usize = 200;

/// Fields as read from the payload, before required ones are unwrapped.
#[derive(Debug, Validate)]
struct ListingDraft {
    #[validate(length(min = 1, max = 200))]
    title: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    price: Option<f64>,
    #[validate(length(min = 1))]
    quartier: Option<String>,
    #[validate(length(min = 1))]
    city: Option<String>,
    #[validate(length(min = 1))]
    address: Option<String>,
    property_type: Option<PropertyType>,
    period: Option<RentPeriod>,
    #[validate(range(min = 0.0))]
    bedrooms: Option<f64>,
    #[validate(range(min = 0.0))]
    bathrooms: Option<f64>,
    #[validate(range(min = 0.0))]
    parking_spaces: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    area: Option<f64>,
    tier_id: Option<TierId>,
    description: Option<String>,
    amenities: Option<Vec<String>>,
    interdictions: Option<Vec<String>>,
}

/// Validate a listing-creation payload, reporting every rejected field.
///
/// Unknown fields are dropped. Interdiction ids are only checked to be strings; unknown
/// ids are labelled by the registry's identity fallback.
pub fn validate_listing(raw: &Value) -> Result<ListingInput, ValidationError> {
    let mut fields = FieldReader::new(raw);

    let draft = ListingDraft {
        title: fields.required_text("title"),
        price: fields.required_number("price"),
        quartier: fields.required_text("quartier"),
        city: fields.required_text("city"),
        address: fields.required_text("address"),
        property_type: fields.required_choice("property_type"),
        period: fields.optional_choice("period"),
        bedrooms: fields.optional_number("bedrooms"),
        bathrooms: fields.optional_number("bathrooms"),
        parking_spaces: fields.optional_number("parking_spaces"),
        area: fields.optional_number("area"),
        tier_id: fields.optional_choice("tier_id"),
        description: fields.optional_text("description"),
        amenities: fields.optional_text_list("amenities"),
        interdictions: fields.optional_text_list("interdictions"),
    };
    fields.check_rules(&draft);

    let ListingDraft {
        title,
        price,
        quartier,
        city,
        address,
        property_type,
        period,
        bedrooms,
        bathrooms,
        parking_spaces,
        area,
        tier_id,
        description,
        amenities,
        interdictions,
    } = draft;

    let listing = (|| {
        Some(ListingInput {
            title: title?,
            price: price?,
            quartier: quartier?,
            city: city?,
            address: address?,
            property_type: property_type?,
            period,
            bedrooms,
            bathrooms,
            parking_spaces,
            area,
            tier_id,
            description,
            amenities,
            interdictions,
        })
    })();

    fields.finish(listing)
}
