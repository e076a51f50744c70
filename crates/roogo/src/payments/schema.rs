use std::borrow::Cow;

use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use super::domain::{MobileMoneyProvider, PaymentInitiateInput, TransactionType};
use crate::validation::{FieldReader, ValidationError};

pub const PHONE_NUMBER_PATTERN: &str = "^[0-9]{8,12}$";
pub const DESCRIPTION_MAX_CHARS: usize = 100;

/// 8 to 12 ASCII digits, no prefix or separators.
pub fn is_phone_number(raw: &str) -> bool {
    (8..=12).contains(&raw.len()) && raw.bytes().all(|byte| byte.is_ascii_digit())
}

fn phone_number_rule(raw: &str) -> Result<(), validator::ValidationError> {
    if is_phone_number(raw) {
        return Ok(());
    }
    Err(validator::ValidationError::new("pattern")
        .with_message(Cow::Borrowed(PHONE_NUMBER_PATTERN)))
}

#[derive(Debug, Validate)]
struct PaymentDraft {
    #[validate(range(exclusive_min = 0.0))]
    amount: Option<f64>,
    #[validate(custom(function = "phone_number_rule"))]
    phone_number: Option<String>,
    provider: Option<MobileMoneyProvider>,
    transaction_type: Option<TransactionType>,
    property_id: Option<Uuid>,
    pre_authorisation_code: Option<String>,
    #[validate(length(max = 100))]
    description: Option<String>,
    metadata: Option<Map<String, Value>>,
}

/// Validate a mobile-money payment request, reporting every rejected field.
pub fn validate_payment_initiate(raw: &Value) -> Result<PaymentInitiateInput, ValidationError> {
    let mut fields = FieldReader::new(raw);

    let draft = PaymentDraft {
        amount: fields.required_number("amount"),
        phone_number: fields.required_text("phoneNumber"),
        provider: fields.required_choice("provider"),
        transaction_type: fields.required_choice("transactionType"),
        property_id: fields.optional_uuid("propertyId"),
        pre_authorisation_code: fields.optional_text("preAuthorisationCode"),
        description: fields.optional_text("description"),
        metadata: fields.optional_object("metadata"),
    };
    fields.check_rules(&draft);

    let PaymentDraft {
        amount,
        phone_number,
        provider,
        transaction_type,
        property_id,
        pre_authorisation_code,
        description,
        metadata,
    } = draft;

    let payment = (|| {
        Some(PaymentInitiateInput {
            amount: amount?,
            phone_number: phone_number?,
            provider: provider?,
            transaction_type: transaction_type?,
            property_id,
            pre_authorisation_code,
            description,
            metadata,
        })
    })();

    fields.finish(payment)
}
