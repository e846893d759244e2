use crate::cli::ServeArgs;
use crate::infra::{
    build_services, seed_demo_accounts, AppState, InMemoryAccountDirectory,
    UnconfiguredMediaFetcher,
};
use crate::routes::with_assistant_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use campus_assist::config::AppConfig;
use campus_assist::error::AppError;
use campus_assist::telemetry;
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
    if let Some(roster) = args.roster.take() {
        config.roster = Some(roster);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let services = build_services(config.roster.as_deref())?;
    let directory = Arc::new(InMemoryAccountDirectory::default());
    seed_demo_accounts(&directory);

    let app = with_assistant_routes(services, directory, Arc::new(UnconfiguredMediaFetcher))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "registration assistant ready");

    axum::serve(listener, app).await?;
    Ok(())
}
