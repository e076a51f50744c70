use std::fs;
use std::path::PathBuf;

use clap::Args;
use roogo::error::AppError;
use roogo::listings::{all_tiers, validate_listing, Tier};
use roogo::payments::validate_payment_initiate;
use roogo::policy::{BOOST_OPTIONS, LOCK_POLICY};
use roogo::validation::Choice;
use serde_json::Value;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Path to the JSON payload to validate
    pub(crate) file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PayloadKind {
    Listing,
    Payment,
}

pub(crate) fn run_tier_table() {
    println!("Roogo listing tiers");
    for tier in all_tiers() {
        println!("- {}", describe_tier(tier));
    }

    println!("\nBoosts");
    for option in &BOOST_OPTIONS {
        println!("- {} days: {} XOF", option.days, option.fee);
    }

    println!(
        "\nLock: {}h hold, extendable in the last {}h, {} XOF",
        LOCK_POLICY.duration_hours, LOCK_POLICY.extension_window_hours, LOCK_POLICY.fee
    );
}

pub(crate) fn describe_tier(tier: &Tier) -> String {
    let video = if tier.video_included {
        "video"
    } else {
        "no video"
    };
    let badge = if tier.has_badge { ", trust badge" } else { "" };
    format!(
        "{}: {} XOF, {} photos, {} active listing(s), {} open house(s), {}{}",
        tier.id.as_str(),
        tier.base_fee,
        tier.photo_limit,
        tier.slot_limit,
        tier.open_house_limit,
        video,
        badge
    )
}

pub(crate) fn run_check(kind: PayloadKind, args: CheckArgs) -> Result<(), AppError> {
    let raw: Value = serde_json::from_str(&fs::read_to_string(&args.file)?)?;

    match check_payload(kind, &raw) {
        Ok(normalized) => {
            println!("{} payload is valid", kind_label(kind));
            println!("{normalized}");
            Ok(())
        }
        Err(AppError::Validation(error)) => {
            println!("{} payload is invalid", kind_label(kind));
            for issue in error.issues() {
                println!("- {}: {}", issue.field, issue.violation);
            }
            Err(AppError::Validation(error))
        }
        Err(other) => Err(other),
    }
}

fn kind_label(kind: PayloadKind) -> &'static str {
    match kind {
        PayloadKind::Listing => "Listing",
        PayloadKind::Payment => "Payment",
    }
}

/// Validate `raw` and render the normalized payload as pretty JSON.
pub(crate) fn check_payload(kind: PayloadKind, raw: &Value) -> Result<String, AppError> {
    let normalized = match kind {
        PayloadKind::Listing => serde_json::to_value(validate_listing(raw)?)?,
        PayloadKind::Payment => serde_json::to_value(validate_payment_initiate(raw)?)?,
    };

    Ok(serde_json::to_string_pretty(&normalized)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roogo::listings::{tier_config, TierId};
    use serde_json::json;

    #[test]
    fn describes_premium_with_badge() {
        let line = describe_tier(tier_config(TierId::Premium));
        assert!(line.starts_with("premium: 10000 XOF"));
        assert!(line.ends_with("video, trust badge"));
    }

    #[test]
    fn describes_essentiel_without_video() {
        let line = describe_tier(tier_config(TierId::Essentiel));
        assert!(line.contains("no video"));
        assert!(!line.contains("badge"));
    }

    #[test]
    fn check_payload_renders_normalized_listing() {
        let raw = json!({
            "title": "Appartement à Koulouba",
            "price": 120000,
            "quartier": "Koulouba",
            "city": "Ouagadougou",
            "address": "Rue 4.28",
            "property_type": "apartment",
            "legacy_field": true,
        });

        let rendered = check_payload(PayloadKind::Listing, &raw).expect("valid listing");
        assert!(rendered.contains("\"property_type\": \"apartment\""));
        assert!(!rendered.contains("legacy_field"));
    }

    #[test]
    fn check_payload_returns_payment_issues() {
        let raw = json!({ "amount": 500, "phoneNumber": "70123456" });
        match check_payload(PayloadKind::Payment, &raw) {
            Err(AppError::Validation(error)) => {
                assert_eq!(error.fields(), vec!["provider", "transactionType"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn run_check_reports_unreadable_files_as_io_errors() {
        let args = CheckArgs {
            file: PathBuf::from("/nonexistent/roogo/listing.json"),
        };
        assert!(matches!(
            run_check(PayloadKind::Listing, args),
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn check_payload_output_parses_back_as_json() {
        let raw = json!({
            "amount": 2500,
            "phoneNumber": "70123456",
            "provider": "MOOV_MONEY",
            "transactionType": "lock",
        });

        let rendered = check_payload(PayloadKind::Payment, &raw).expect("valid payment");
        let parsed: Value = serde_json::from_str(&rendered).expect("rendered json");
        assert_eq!(parsed["provider"], "MOOV_MONEY");
        assert_eq!(parsed["transactionType"], "lock");
    }
}
