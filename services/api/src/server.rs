use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeaseBackend};
use crate::routes::with_lease_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use leaseflow::config::AppConfig;
use leaseflow::error::AppError;
use leaseflow::telemetry;
use leaseflow::workflows::leasing::LeaseLifecycleService;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let backend = Arc::new(InMemoryLeaseBackend::default());
    let lease_service = Arc::new(LeaseLifecycleService::new(backend));

    let app = with_lease_routes(lease_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lease marketplace service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
