use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::validation::Choice;

/// Mobile-money operators supported in Burkina Faso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MobileMoneyProvider {
    OrangeMoney,
    MoovMoney,
}

impl Choice for MobileMoneyProvider {
    const ALL: &'static [Self] = &[MobileMoneyProvider::OrangeMoney, MobileMoneyProvider::MoovMoney];
    const NAMES: &'static [&'static str] = &["ORANGE_MONEY", "MOOV_MONEY"];

    fn as_str(self) -> &'static str {
        match self {
            MobileMoneyProvider::OrangeMoney => "ORANGE_MONEY",
            MobileMoneyProvider::MoovMoney => "MOOV_MONEY",
        }
    }
}

/// What the payment pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Listing,
    Boost,
    Lock,
}

impl Choice for TransactionType {
    const ALL: &'static [Self] = &[
        TransactionType::Listing,
        TransactionType::Boost,
        TransactionType::Lock,
    ];
    const NAMES: &'static [&'static str] = &["listing", "boost", "lock"];

    fn as_str(self) -> &'static str {
        match self {
            TransactionType::Listing => "listing",
            TransactionType::Boost => "boost",
            TransactionType::Lock => "lock",
        }
    }
}

/// Normalized payment request produced by `validate_payment_initiate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiateInput {
    pub amount: f64,
    pub phone_number: String,
    pub provider: MobileMoneyProvider,
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_authorisation_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
}

/// Acknowledgement returned once the operator accepted the request for processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: Uuid,
    pub provider_reference: String,
    pub status: PaymentStatus,
    pub amount: f64,
    pub provider: MobileMoneyProvider,
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<Uuid>,
    pub initiated_at: DateTime<Utc>,
}
