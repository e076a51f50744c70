//! Mobile-money payment initiation for listing fees, boosts, and locks.
//!
//! Only the request contract lives here; talking to the operator goes through
//! [`PaymentGateway`].

pub mod domain;
pub mod gateway;
pub mod router;
pub mod schema;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    MobileMoneyProvider, PaymentInitiateInput, PaymentReceipt, PaymentStatus, TransactionType,
};
pub use gateway::{GatewayError, GatewayReceipt, PaymentGateway};
pub use router::payment_router;
pub use schema::validate_payment_initiate;
pub use service::{PaymentService, PaymentServiceError};
