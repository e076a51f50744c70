use serde::{Deserialize, Serialize};

use super::domain::PaymentInitiateInput;

/// Outbound hook to the mobile-money operator (Orange Money, Moov Money).
pub trait PaymentGateway: Send + Sync {
    fn initiate(&self, request: &PaymentInitiateInput) -> Result<GatewayReceipt, GatewayError>;
}

/// Operator-side acknowledgement of an initiated payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReceipt {
    pub provider_reference: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("payment declined by operator: {0}")]
    Declined(String),
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}
