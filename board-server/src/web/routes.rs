//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{Local, Utc};
use tower_http::trace::TraceLayer;

use crate::domain::{StationCode, format_updated_at};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations/search", get(search_stations))
        .route("/board/:code", get(station_board))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render(template: &impl Template) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Index page with station search.
async fn index_page(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Response, AppError> {
    let snapshot = state.feed.snapshot().await;
    let stations = snapshot
        .search_stations(&req.q, req.effective_limit())
        .into_iter()
        .map(StationLink::from_station)
        .collect();

    render(&IndexTemplate {
        query: req.q,
        stations,
    })
}

/// Search stations by name, city, code or state.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let snapshot = state.feed.snapshot().await;
    let stations = snapshot
        .search_stations(&req.q, req.effective_limit())
        .into_iter()
        .map(StationSearchResult::from_station)
        .collect();

    Json(StationSearchResponse { stations })
}

/// Departure and arrival boards for a station.
async fn station_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    let station = StationCode::parse_normalized(&code).map_err(|_| AppError::BadRequest {
        message: format!("Invalid station code: {}", code),
    })?;

    let snapshot = state.feed.snapshot().await;
    let status = state.feed.status().await;

    let board = snapshot
        .board(station, &state.window, Utc::now())
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {}", station),
        })?;

    let last_updated = status
        .updated_at
        .map(|t| format_updated_at(&t.with_timezone(&Local)));

    if accepts_html(&headers) {
        render(&BoardTemplate::from_board(
            &board,
            state.window.lookahead_hours,
            state.refresh_interval.as_secs().max(1),
            last_updated,
            status.error,
        ))
    } else {
        Ok(Json(BoardResponse::from_board(&board, last_updated, status.error)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::debug!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardWindow;
    use crate::domain::{Station, StationStop, Train, TrainId};
    use crate::feed::{FeedError, FeedSnapshot, FeedSource, SharedFeed};
    use axum::http::HeaderValue;
    use chrono::Duration;
    use std::time::Duration as StdDuration;

    /// Serves a board for WAS with one train departing in 30 minutes.
    struct Fixed;

    impl FeedSource for Fixed {
        fn load(&self) -> Result<FeedSnapshot, FeedError> {
            let was = StationCode::parse("WAS").unwrap();
            let departs = (Utc::now() + Duration::minutes(30)).fixed_offset();
            Ok(FeedSnapshot::new(
                vec![Station {
                    code: was,
                    name: "Washington Union".to_string(),
                    city: "Washington".to_string(),
                    state: "DC".to_string(),
                    trains: vec![TrainId::new("19-1")],
                }],
                vec![Train {
                    id: TrainId::new("19-1"),
                    number: 19,
                    route_name: "Crescent".to_string(),
                    origin_name: "New York Penn".to_string(),
                    destination_name: "New Orleans".to_string(),
                    stops: vec![StationStop {
                        code: was,
                        scheduled_arrival: None,
                        scheduled_departure: Some(departs),
                        status: "Enroute".to_string(),
                        arrival_comment: None,
                        departure_comment: Some("0 Minutes Early".to_string()),
                    }],
                }],
            ))
        }
    }

    fn state() -> AppState {
        AppState::new(
            SharedFeed::load(Fixed).unwrap(),
            BoardWindow::default(),
            StdDuration::from_secs(30),
        )
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn board_json() {
        let response = station_board(State(state()), HeaderMap::new(), Path("was".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["station_code"], "WAS");
        assert_eq!(json["departures"][0]["number"], 19);
        assert_eq!(json["departures"][0]["counterpart"], "New Orleans");
        assert_eq!(json["departures"][0]["status"], "On time");
        assert_eq!(json["feed_error"], false);
        assert!(json["last_updated"].is_string());
    }

    #[tokio::test]
    async fn board_html() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));

        let response = station_board(State(state()), headers, Path("WAS".to_string()))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Washington Union Station"));
        assert!(html.contains("Crescent"));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="30">"#));
    }

    #[tokio::test]
    async fn board_bad_code() {
        let err = station_board(State(state()), HeaderMap::new(), Path("W1".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn board_unknown_station() {
        let err = station_board(State(state()), HeaderMap::new(), Path("CHI".to_string()))
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Unknown station: CHI");
    }

    #[tokio::test]
    async fn search_endpoint() {
        let Json(response) = search_stations(
            State(state()),
            Query(StationSearchRequest {
                q: "union".to_string(),
                limit: None,
            }),
        )
        .await;
        assert_eq!(response.stations.len(), 1);
        assert_eq!(response.stations[0].code, "WAS");
    }

    #[tokio::test]
    async fn index_with_query() {
        let response = index_page(
            State(state()),
            Query(StationSearchRequest {
                q: "washington".to_string(),
                limit: None,
            }),
        )
        .await
        .unwrap();
        let html = body_text(response).await;
        assert!(html.contains(r#"href="/board/WAS""#));
    }

    #[tokio::test]
    async fn health_ok() {
        assert_eq!(health().await, "ok");
    }

    #[test]
    fn html_detection() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        assert!(accepts_html(&headers));
    }
}
