//! HTTP layer
//!
//! One read-only route over a snapshot that was fully built before the router
//! exists. Handlers share it through an `Arc`; there is nothing to lock.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::snapshot::SessionSnapshot;

/// Route serving the snapshot.
pub const TELEMETRY_ROUTE: &str = "/telemetry";

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    snapshot: Arc<SessionSnapshot>,
}

impl AppState {
    pub fn new(snapshot: Arc<SessionSnapshot>) -> Self {
        Self { snapshot }
    }
}

/// Build the application router around an already-built snapshot.
///
/// CORS allows every origin, method and header. Do not expose this publicly.
pub fn router(snapshot: Arc<SessionSnapshot>) -> Router {
    Router::new()
        .route(TELEMETRY_ROUTE, get(get_telemetry))
        .with_state(AppState::new(snapshot))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn get_telemetry(State(state): State<AppState>) -> Json<Arc<SessionSnapshot>> {
    Json(Arc::clone(&state.snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, FIXTURE_SAMPLES};
    use crate::transform::build_snapshot;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn serves_fixture_snapshot() {
        let snapshot = Arc::new(build_snapshot(&test_utils::fixture_session()));
        let app = router(Arc::clone(&snapshot));

        let response = app
            .oneshot(Request::get(TELEMETRY_ROUTE).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let served: SessionSnapshot = serde_json::from_slice(&body).unwrap();
        assert_eq!(&served, snapshot.as_ref());
        assert_eq!(served.laps.len(), 6);
        assert_eq!(served.telemetry.len(), 1);
        assert_eq!(served.telemetry[0].len(), FIXTURE_SAMPLES);
    }
}
