// tests/dashboard_test.rs

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::path::PathBuf;
use tower::ServiceExt;

use three_phase_csv_render::dashboard::{build_router, AppState};
use three_phase_csv_render::data_input::csv_parser::load_sensor_csv;

fn sample_state() -> AppState {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample_sensor.csv");
    AppState::new(load_sensor_csv(&path).unwrap(), "sample_sensor")
}

async fn get(uri: &str) -> (StatusCode, Option<String>, String) {
    let response = build_router(sample_state())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn test_dashboard_page_defaults() {
    let (status, content_type, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("Three Phase Sensor"));
    assert!(body.contains(r#"value="p" checked"#));
    assert!(body.contains(r#"value="v" checked"#));
    assert!(body.contains(r#"value="include" checked"#));
    assert!(body.contains("/plot.svg?types=p,q,i,v&amp;outliers=include"));
}

#[tokio::test]
async fn test_dashboard_page_reflects_query() {
    let (status, _, body) = get("/?types=v,i&outliers=remove").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="p">"#));
    assert!(body.contains(r#"value="remove" checked"#));
    assert!(body.contains("/plot.svg?types=v,i&amp;outliers=remove"));
    // The control script starts from this order rather than checkbox order
    assert!(body.contains(r#"data-types="v,i""#));
}

#[tokio::test]
async fn test_plot_svg_renders_selection() {
    let (status, content_type, body) = get("/plot.svg?types=i&outliers=remove").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    assert!(body.starts_with("<svg"));
    assert!(body.contains("current (i)"));
    assert!(!body.contains("voltage (v)"));
}

#[tokio::test]
async fn test_plot_svg_rejects_unknown_type() {
    let (status, _, body) = get("/plot.svg?types=p,x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("unknown signal type 'x'"));
}

#[tokio::test]
async fn test_plot_svg_rejects_unknown_outlier_mode() {
    let (status, _, _) = get("/plot.svg?outliers=sometimes").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_plot_svg_outlier_mode_is_case_insensitive() {
    let (status, _, body) = get("/plot.svg?types=p&outliers=Remove").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("(outliers removed)"));
}

#[tokio::test]
async fn test_health() {
    let (status, _, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["rows"], 60);
    assert_eq!(json["columns"], 12);
}
