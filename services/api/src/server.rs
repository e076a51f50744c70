use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryListingRepository, SandboxPaymentGateway};
use crate::routes::with_domain_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use roogo::config::AppConfig;
use roogo::error::AppError;
use roogo::listings::ListingService;
use roogo::payments::PaymentService;
use roogo::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let listings = Arc::new(ListingService::new(
        Arc::new(InMemoryListingRepository::default()),
        config.listings.default_tier,
    ));
    let payments = Arc::new(PaymentService::with_rate_limit(
        Arc::new(SandboxPaymentGateway::default()),
        config.payments.rate_limit,
    ));

    let app = with_domain_routes(listings, payments)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_tier = ?config.listings.default_tier,
        "roogo api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
