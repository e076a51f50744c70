use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::payments::domain::PaymentInitiateInput;
use crate::payments::gateway::{GatewayError, GatewayReceipt, PaymentGateway};
use crate::payments::service::PaymentService;

pub(super) fn payment_request() -> Value {
    json!({
        "amount": 1000,
        "phoneNumber": "12345678",
        "provider": "ORANGE_MONEY",
        "transactionType": "listing",
    })
}

pub(super) fn full_payment_request() -> Value {
    json!({
        "amount": 3500,
        "phoneNumber": "22670123456",
        "provider": "MOOV_MONEY",
        "transactionType": "boost",
        "propertyId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
        "preAuthorisationCode": "482913",
        "description": "Boost 30 jours",
        "metadata": { "boost_days": 30, "source": { "screen": "dashboard" } },
    })
}

pub(super) fn build_service() -> (PaymentService<RecordingGateway>, Arc<RecordingGateway>) {
    let gateway = Arc::new(RecordingGateway::default());
    let service = PaymentService::new(gateway.clone());
    (service, gateway)
}

#[derive(Default, Clone)]
pub(super) struct RecordingGateway {
    requests: Arc<Mutex<Vec<PaymentInitiateInput>>>,
}

impl RecordingGateway {
    pub(super) fn requests(&self) -> Vec<PaymentInitiateInput> {
        self.requests.lock().expect("gateway mutex poisoned").clone()
    }
}

impl PaymentGateway for RecordingGateway {
    fn initiate(&self, request: &PaymentInitiateInput) -> Result<GatewayReceipt, GatewayError> {
        let mut guard = self.requests.lock().expect("gateway mutex poisoned");
        guard.push(request.clone());
        Ok(GatewayReceipt {
            provider_reference: format!("OM-{:06}", guard.len()),
        })
    }
}

pub(super) struct DecliningGateway;

impl PaymentGateway for DecliningGateway {
    fn initiate(&self, _request: &PaymentInitiateInput) -> Result<GatewayReceipt, GatewayError> {
        Err(GatewayError::Declined("insufficient balance".to_string()))
    }
}

pub(super) struct OfflineGateway;

impl PaymentGateway for OfflineGateway {
    fn initiate(&self, _request: &PaymentInitiateInput) -> Result<GatewayReceipt, GatewayError> {
        Err(GatewayError::Unavailable("operator timeout".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
