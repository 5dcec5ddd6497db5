use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use broker_desk::config::AppConfig;
use broker_desk::error::AppError;
use broker_desk::telemetry;
use broker_desk::workflows::pipeline::seeded_gateway;
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
    if let Some(mode) = args.gateway.take() {
        config.dashboard.gateway_mode = mode;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let gateway_mode = config.dashboard.gateway_mode;
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        gateway_mode,
    };

    let app = with_dashboard_routes(seeded_gateway(gateway_mode)?)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        gateway = gateway_mode.label(),
        "broker desk gateway ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
