use super::common::*;
use serde_json::json;

use crate::listings::domain::{PropertyType, RentPeriod};
use crate::listings::schema::{validate_listing, TITLE_MAX_CHARS};
use crate::listings::tiers::TierId;
use crate::validation::Violation;

#[test]
fn minimal_listing_is_accepted() {
    let listing = validate_listing(&minimal_listing()).expect("minimal listing valid");

    assert_eq!(listing.title, "A");
    assert_eq!(listing.price, 10.0);
    assert_eq!(listing.property_type, PropertyType::Apartment);
    assert!(listing.period.is_none());
    assert!(listing.tier_id.is_none());
    assert!(listing.interdictions.is_none());
}

#[test]
fn full_listing_keeps_optional_fields() {
    let listing = validate_listing(&full_listing()).expect("full listing valid");

    assert_eq!(listing.period, Some(RentPeriod::Month));
    assert_eq!(listing.bedrooms, Some(4.0));
    assert_eq!(listing.area, Some(320.5));
    assert_eq!(listing.tier_id, Some(TierId::Premium));
    assert_eq!(
        listing.interdictions,
        Some(vec!["no_fumeurs".to_string(), "no_animaux".to_string()])
    );
    assert_eq!(listing.amenities.as_ref().map(Vec::len), Some(3));
}

#[test]
fn batch_reports_every_invalid_field() {
    let raw = json!({
        "title": "",
        "price": -5,
        "quartier": "Q",
        "city": "C",
        "address": "Addr",
        "property_type": "boat",
    });

    let error = validate_listing(&raw).expect_err("payload rejected");

    assert!(error.issues().len() >= 3);
    assert_eq!(error.violation_for("title"), Some(&Violation::Empty));
    assert_eq!(error.violation_for("price"), Some(&Violation::NotPositive));
    assert!(matches!(
        error.violation_for("property_type"),
        Some(Violation::UnknownChoice { .. })
    ));
    assert!(!error.has_issue("quartier"));
}

#[test]
fn missing_required_fields_are_reported() {
    let error = validate_listing(&json!({})).expect_err("empty payload rejected");

    assert_eq!(
        error.fields(),
        vec!["title", "price", "quartier", "city", "address", "property_type"]
    );
    assert!(error
        .issues()
        .iter()
        .all(|issue| issue.violation == Violation::Required));
}

#[test]
fn title_length_is_capped() {
    let mut raw = minimal_listing();
    raw["title"] = json!("x".repeat(TITLE_MAX_CHARS));
    assert!(validate_listing(&raw).is_ok());

    raw["title"] = json!("x".repeat(TITLE_MAX_CHARS + 1));
    let error = validate_listing(&raw).expect_err("long title rejected");
    assert_eq!(
        error.violation_for("title"),
        Some(&Violation::TooLong {
            max: TITLE_MAX_CHARS
        })
    );
}

#[test]
fn zero_price_is_rejected_and_string_price_is_not_a_number() {
    let mut raw = minimal_listing();
    raw["price"] = json!(0);
    let error = validate_listing(&raw).expect_err("zero price rejected");
    assert_eq!(error.violation_for("price"), Some(&Violation::NotPositive));

    raw["price"] = json!("150000");
    let error = validate_listing(&raw).expect_err("string price rejected");
    assert_eq!(error.violation_for("price"), Some(&Violation::NotANumber));
}

#[test]
fn optional_counts_allow_zero_but_not_negative() {
    let mut raw = minimal_listing();
    raw["bedrooms"] = json!(0);
    raw["parking_spaces"] = json!(0);
    assert!(validate_listing(&raw).is_ok());

    raw["bathrooms"] = json!(-1);
    raw["area"] = json!(0);
    let error = validate_listing(&raw).expect_err("negative bathrooms rejected");
    assert_eq!(error.violation_for("bathrooms"), Some(&Violation::Negative));
    assert_eq!(error.violation_for("area"), Some(&Violation::NotPositive));
}

#[test]
fn enumerated_optionals_are_checked() {
    let mut raw = minimal_listing();
    raw["period"] = json!("week");
    raw["tier_id"] = json!("gold");

    let error = validate_listing(&raw).expect_err("unknown enums rejected");
    assert_eq!(error.fields(), vec!["period", "tier_id"]);
}

#[test]
fn lists_must_hold_strings() {
    let mut raw = minimal_listing();
    raw["amenities"] = json!("piscine");
    raw["interdictions"] = json!(["no_animaux", 7]);

    let error = validate_listing(&raw).expect_err("bad lists rejected");
    assert_eq!(error.violation_for("amenities"), Some(&Violation::NotAList));
    assert_eq!(
        error.violation_for("interdictions[1]"),
        Some(&Violation::NotAString)
    );
}

#[test]
fn unknown_interdictions_pass_validation() {
    let mut raw = minimal_listing();
    raw["interdictions"] = json!(["no_karaoke"]);

    let listing = validate_listing(&raw).expect("unknown tag accepted");
    assert_eq!(listing.interdictions, Some(vec!["no_karaoke".to_string()]));
}

#[test]
fn extra_fields_are_stripped() {
    let mut raw = minimal_listing();
    raw["owner_id"] = json!("someone-else");
    raw["is_verified"] = json!(true);

    let listing = validate_listing(&raw).expect("extra fields ignored");
    let normalized = serde_json::to_value(&listing).expect("serializes");
    assert!(normalized.get("owner_id").is_none());
    assert!(normalized.get("is_verified").is_none());
}

#[test]
fn null_optionals_are_treated_as_absent() {
    let mut raw = minimal_listing();
    raw["description"] = json!(null);
    raw["tier_id"] = json!(null);

    let listing = validate_listing(&raw).expect("null optionals accepted");
    assert!(listing.description.is_none());
    assert!(listing.tier_id.is_none());
}

#[test]
fn revalidating_normalized_value_is_idempotent() {
    for raw in [minimal_listing(), full_listing()] {
        let first = validate_listing(&raw).expect("valid");
        let normalized = serde_json::to_value(&first).expect("serializes");
        let second = validate_listing(&normalized).expect("still valid");
        assert_eq!(first, second);
    }
}

#[test]
fn non_object_payload_is_rejected() {
    let error = validate_listing(&json!("listing")).expect_err("string rejected");
    assert_eq!(error.fields(), vec!["$"]);
}
