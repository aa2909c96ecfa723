use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use meta_scorer::config::AppConfig;
use meta_scorer::error::AppError;
use meta_scorer::scoring::{ScoringAggregator, TracingObserver};
use meta_scorer::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    if let Some(path) = args.config.take() {
        config.scoring.config_path = path;
    }

    telemetry::init(&config.telemetry)?;

    let aggregator =
        ScoringAggregator::from_path(&config.scoring.config_path, Arc::new(TracingObserver))?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        aggregator,
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        config_path = %config.scoring.config_path.display(),
        "meta-scorer api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
