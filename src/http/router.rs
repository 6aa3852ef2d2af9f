//! Router configuration for the dashboard server.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/api/views", get(handlers::views_json))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Datasets;
    use crate::records::RentalRecord;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        let record = |day: u32, hour: Option<u8>, season: u8, cnt: u32| RentalRecord {
            date: NaiveDate::from_ymd_opt(2011, 3, day).unwrap(),
            hour,
            season_code: Some(i64::from(season)),
            weekday_code: Some(i64::from(day % 7)),
            temp: 0.4,
            casual: cnt / 5,
            registered: cnt - cnt / 5,
            cnt,
            weekday: None,
            season: None,
            temp_band: None,
        };
        let datasets = Datasets::new(
            vec![record(20, Some(8), 1, 120), record(21, Some(17), 2, 300)],
            vec![record(20, None, 1, 2000), record(21, None, 2, 2500)],
        );
        AppState::new(Arc::new(datasets)).unwrap()
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let response = create_router(state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ok"));
    }

    #[tokio::test]
    async fn test_dashboard_defaults_to_full_extent() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("name=\"start\" value=\"2011-03-20\""));
        assert!(body.contains("name=\"end\" value=\"2011-03-21\""));
        assert!(body.contains("value=\"Summer\" checked"));
    }

    #[tokio::test]
    async fn test_views_json_applies_filter() {
        let (status, body) = get("/api/views?start=2011-03-20&end=2011-03-21&season=spring").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["daily_rows"], 1);
        assert_eq!(json["hourly_rows"], 1);
        assert_eq!(json["weather"]["groups"][0]["mean"], 2000.0);
    }

    #[tokio::test]
    async fn test_empty_season_selection_renders_placeholders() {
        let (status, body) = get("/?season=").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(crate::charts::NO_DATA_LABEL));
    }

    #[tokio::test]
    async fn test_bad_input_is_rejected() {
        let (status, body) = get("/api/views?start=2011-13-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("BAD_REQUEST"));

        let (status, _) = get("/api/views?start=2011-03-21&end=2011-03-20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get("/api/views?season=monsoon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
