//! End-to-end tests for the HTTP layer
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`; no socket is bound.

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use std::sync::Arc;
use tower::ServiceExt;

use paddock::server::{TELEMETRY_ROUTE, router};
use paddock::snapshot::TelemetrySample;
use paddock::{LapRecord, SessionSnapshot, TelemetrySeries};

fn snapshot() -> Arc<SessionSnapshot> {
    let mut ver = TelemetrySeries::new("VER");
    ver.extend((0..5).map(|i| TelemetrySample {
        speed: 280.5 + i as f64,
        throttle: 100.0,
        brake: i == 4,
        gear: 8,
    }));

    Arc::new(SessionSnapshot {
        laps: vec![
            LapRecord {
                driver: "VER".to_string(),
                lap_number: 1,
                position: Some(1),
                lap_time: Some("0 days 00:01:37.284000".to_string()),
                sector1_time: Some("0 days 00:00:31.012000".to_string()),
                sector2_time: Some("0 days 00:00:41.300000".to_string()),
                sector3_time: Some("0 days 00:00:24.972000".to_string()),
            },
            LapRecord {
                driver: "SAR".to_string(),
                lap_number: 1,
                position: None,
                lap_time: None,
                sector1_time: None,
                sector2_time: None,
                sector3_time: None,
            },
        ],
        telemetry: vec![ver],
    })
}

#[tokio::test]
async fn get_telemetry_returns_snapshot_json() {
    let response = router(snapshot())
        .oneshot(Request::get(TELEMETRY_ROUTE).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let keys = value.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys, vec!["laps".to_string(), "telemetry".to_string()]);
    assert_eq!(value["laps"][0]["lap_time"], "0 days 00:01:37.284000");
    assert!(value["laps"][1]["position"].is_null());
    assert_eq!(value["telemetry"][0]["driver"], "VER");
    assert_eq!(value["telemetry"][0]["speed"][0], 280.5);
    assert_eq!(value["telemetry"][0]["brake"][4], true);

    let parsed: SessionSnapshot = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, *snapshot());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(TELEMETRY_ROUTE)
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom-header")
        .body(Body::empty())
        .unwrap();

    let response = router(snapshot()).oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
}

#[tokio::test]
async fn other_routes_are_not_found() {
    let response = router(snapshot())
        .oneshot(Request::get("/laps").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
