use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySubjectRepository};
use crate::routes::with_performance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use valuation_ai::config::AppConfig;
use valuation_ai::error::AppError;
use valuation_ai::telemetry;
use valuation_ai::workflows::performance::PerformanceService;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // A bad table aborts startup rather than producing NaN scores later.
    let table = config.scoring.category_table()?;
    info!(
        categories = table.profiles().len(),
        default_category = %table.default_profile().name,
        "category table loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySubjectRepository::default());
    let service = Arc::new(PerformanceService::new(
        repository,
        Arc::new(table),
        config.scoring.policy,
    ));

    let app = with_performance_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "workforce scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
