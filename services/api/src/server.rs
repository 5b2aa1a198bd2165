use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_catalog_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use renewal_incentives::config::AppConfig;
use renewal_incentives::error::AppError;
use renewal_incentives::incentives::{CatalogHandle, LoadStatus};
use renewal_incentives::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(CatalogHandle::load(config.catalog.data_path.clone()));
    match catalog.status() {
        LoadStatus::Ready { records } => info!(records, "incentive catalog ready"),
        // Serve anyway: the selectors endpoint reports the failure and a
        // corrected source can be picked up through the reload endpoint.
        LoadStatus::Failed { reason } => warn!(%reason, "serving without incentive data"),
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_catalog_routes(catalog)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "renewal incentive service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
