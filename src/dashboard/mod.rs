//! Browser dashboard: the two selection controls and a server-rendered figure.

use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::data_input::sensor_data::SensorFrame;

pub mod page;
pub mod routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub frame: Arc<SensorFrame>,
    /// Shown in the page banner and the figure title.
    pub source_name: Arc<str>,
}

impl AppState {
    pub fn new(frame: SensorFrame, source_name: &str) -> Self {
        Self {
            frame: Arc::new(frame),
            source_name: Arc::from(source_name),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::dashboard))
        .route("/plot.svg", get(routes::plot_svg))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves the dashboard until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "three_phase_csv_render v{} dashboard listening on http://{}",
        crate::crate_version(),
        addr
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down dashboard");
        })
        .await
}
