use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::build_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use learnwell::config::AppConfig;
use learnwell::courses::CourseState;
use learnwell::error::AppError;
use learnwell::profiles::{MemoryProfileStore, ProfileService};
use learnwell::telemetry;
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
    if let Some(catalog) = args.catalog.take() {
        config.catalog.path = Some(catalog);
    }
    if let Some(snapshot) = args.snapshot.take() {
        config.store.snapshot_path = Some(snapshot);
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(load_catalog(config.catalog.path.as_deref())?);
    let store = Arc::new(MemoryProfileStore::connect(&config.store)?);
    let profile_service = Arc::new(ProfileService::new(store.clone()));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = build_router(profile_service, CourseState::new(catalog))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "learnwell service ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(readiness_flag))
        .await?;

    store.disconnect()?;
    info!("learnwell service stopped");
    Ok(())
}

async fn shutdown_signal(readiness: Arc<std::sync::atomic::AtomicBool>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    readiness.store(false, Ordering::Release);
    info!("shutdown signal received");
}
