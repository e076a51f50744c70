//! Integration tests for mobile-money payment initiation.

use std::sync::{Arc, Mutex};

use roogo::payments::{
    validate_payment_initiate, GatewayError, GatewayReceipt, MobileMoneyProvider,
    PaymentGateway, PaymentInitiateInput, PaymentService, PaymentServiceError,
};
use serde_json::json;

#[derive(Default)]
struct CountingGateway {
    calls: Mutex<u32>,
}

impl PaymentGateway for CountingGateway {
    fn initiate(&self, request: &PaymentInitiateInput) -> Result<GatewayReceipt, GatewayError> {
        let mut calls = self.calls.lock().expect("gateway mutex poisoned");
        *calls += 1;
        let prefix = match request.provider {
            MobileMoneyProvider::OrangeMoney => "OM",
            MobileMoneyProvider::MoovMoney => "MM",
        };
        Ok(GatewayReceipt {
            provider_reference: format!("{prefix}-{}", *calls),
        })
    }
}

#[test]
fn minimal_payment_validates() {
    let payment = validate_payment_initiate(&json!({
        "amount": 1000,
        "phoneNumber": "12345678",
        "provider": "ORANGE_MONEY",
        "transactionType": "listing",
    }))
    .expect("payment accepted");

    assert_eq!(payment.provider, MobileMoneyProvider::OrangeMoney);
}

#[test]
fn invalid_payment_reports_amount_phone_and_provider() {
    let error = validate_payment_initiate(&json!({
        "amount": 0,
        "phoneNumber": "123",
        "provider": "BITCOIN",
        "transactionType": "listing",
    }))
    .expect_err("payment rejected");

    for field in ["amount", "phoneNumber", "provider"] {
        assert!(error.has_issue(field), "missing issue for {field}");
    }
    assert!(!error.has_issue("transactionType"));
}

#[test]
fn service_initiates_through_gateway() {
    let gateway = Arc::new(CountingGateway::default());
    let service = PaymentService::new(gateway.clone());

    let receipt = service
        .initiate(&json!({
            "amount": 2000,
            "phoneNumber": "76543210",
            "provider": "MOOV_MONEY",
            "transactionType": "lock",
            "propertyId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
        }))
        .expect("payment initiated");

    assert_eq!(receipt.provider_reference, "MM-1");
    assert!(receipt.property_id.is_some());
    assert_eq!(*gateway.calls.lock().expect("gateway mutex poisoned"), 1);

    match service.initiate(&json!({ "amount": 2000 })) {
        Err(PaymentServiceError::Invalid(error)) => {
            assert_eq!(
                error.fields(),
                vec!["phoneNumber", "provider", "transactionType"]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
