use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::domain::{PaymentReceipt, PaymentStatus};
use super::gateway::{GatewayError, PaymentGateway};
use super::schema::validate_payment_initiate;
use crate::policy::{RateLimitPolicy, PAYMENT_INITIATION_LIMIT};
use crate::ratelimit::{FixedWindowLimiter, RateLimited};
use crate::validation::{Choice, ValidationError};

/// Service validating payment requests before handing them to the operator.
pub struct PaymentService<G> {
    gateway: Arc<G>,
    limiter: FixedWindowLimiter,
}

impl<G> PaymentService<G>
where
    G: PaymentGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_rate_limit(gateway, PAYMENT_INITIATION_LIMIT)
    }

    pub fn with_rate_limit(gateway: Arc<G>, policy: RateLimitPolicy) -> Self {
        Self {
            gateway,
            limiter: FixedWindowLimiter::new(policy),
        }
    }

    /// Validate `raw`, apply the per-phone rate limit, and initiate the payment.
    pub fn initiate(&self, raw: &Value) -> Result<PaymentReceipt, PaymentServiceError> {
        let request = validate_payment_initiate(raw).map_err(|error| {
            warn!(issues = error.issues().len(), "payment request rejected");
            PaymentServiceError::Invalid(error)
        })?;

        self.limiter.check(&request.phone_number)?;

        let acknowledgement = self.gateway.initiate(&request)?;
        let receipt = PaymentReceipt {
            reference: Uuid::new_v4(),
            provider_reference: acknowledgement.provider_reference,
            status: PaymentStatus::Pending,
            amount: request.amount,
            provider: request.provider,
            transaction_type: request.transaction_type,
            property_id: request.property_id,
            initiated_at: Utc::now(),
        };

        info!(
            reference = %receipt.reference,
            provider = receipt.provider.as_str(),
            transaction = receipt.transaction_type.as_str(),
            "payment initiated"
        );
        Ok(receipt)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentServiceError {
    #[error(transparent)]
    Invalid(ValidationError),
    #[error(transparent)]
    RateLimited(#[from] RateLimited),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
