//! Dashboard route handlers

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{debug, error};

use crate::dashboard::page::render_dashboard_page;
use crate::dashboard::AppState;
use crate::data_analysis::selection::{OutlierMode, TypeSelection};
use crate::error::SensorError;
use crate::plot_functions::plot_phase_signals::phase_signals_svg;

/// Control state carried in the query string, e.g. `?types=p,i&outliers=remove`.
#[derive(Debug, Default, Deserialize)]
pub struct PlotParams {
    pub types: Option<String>,
    pub outliers: Option<OutlierMode>,
}

impl PlotParams {
    /// Resolves the parameters, falling back to all types and `include`.
    pub fn resolve(&self) -> Result<(TypeSelection, OutlierMode), SensorError> {
        let selection = match &self.types {
            Some(types) => types.parse()?,
            None => TypeSelection::default(),
        };
        Ok((selection, self.outliers.unwrap_or_default()))
    }
}

fn bad_request(err: SensorError) -> Response {
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}

pub async fn dashboard(State(state): State<AppState>, Query(params): Query<PlotParams>) -> Response {
    match params.resolve() {
        Ok((selection, outlier_mode)) => {
            Html(render_dashboard_page(&state.source_name, &selection, outlier_mode)).into_response()
        }
        Err(e) => bad_request(e),
    }
}

/// Re-renders the figure for the requested controls.
pub async fn plot_svg(State(state): State<AppState>, Query(params): Query<PlotParams>) -> Response {
    let (selection, outlier_mode) = match params.resolve() {
        Ok(resolved) => resolved,
        Err(e) => return bad_request(e),
    };
    debug!("Types chosen are: {}, outlier mode: {}", selection, outlier_mode);

    match phase_signals_svg(&state.frame, &selection, outlier_mode, &state.source_name) {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(e) => {
            let message = e.to_string();
            error!("Failed to render plot: {}", message);
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::crate_version(),
        "rows": state.frame.len(),
        "columns": state.frame.columns.len(),
    }))
}
