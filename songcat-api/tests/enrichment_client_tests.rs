//! Tests for the HTTP song info client
//!
//! A throwaway axum server on 127.0.0.1 plays the provider so each failure
//! mode can be produced on demand.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use songcat_api::enrichment::{EnrichmentError, HttpSongInfoClient, SongInfoProvider};
use std::collections::HashMap;
use std::time::Duration;

/// Provider behaviour keyed on the requested song title
async fn fake_info(Query(params): Query<HashMap<String, String>>) -> Response {
    let group = params.get("group").cloned().unwrap_or_default();
    let song = params.get("song").cloned().unwrap_or_default();

    match song.as_str() {
        "missing" => (StatusCode::NOT_FOUND, "no such song").into_response(),
        "garbage" => (StatusCode::OK, "<html>oops</html>").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            (StatusCode::OK, "{}").into_response()
        }
        _ => axum::Json(serde_json::json!({
            "releaseDate": "16.07.2006",
            "text": format!("{} sings\n{}", group, song),
            "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
        }))
        .into_response(),
    }
}

/// Start the fake provider and return its base URL
async fn start_provider() -> String {
    let app = Router::new().route("/info", get(fake_info));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str, timeout: Duration) -> HttpSongInfoClient {
    HttpSongInfoClient::new(base_url, timeout, "songcat-tests").unwrap()
}

#[tokio::test]
async fn test_lookup_success_sends_query_params() {
    let base_url = start_provider().await;
    let client = client(&base_url, Duration::from_secs(5));

    let details = client.lookup("Muse", "Supermassive Black Hole").await.unwrap();

    assert_eq!(details.release_date, "16.07.2006");
    assert_eq!(details.lyrics, "Muse sings\nSupermassive Black Hole");
    assert_eq!(details.link, "https://www.youtube.com/watch?v=Xsp3_a-PMTw");
}

#[tokio::test]
async fn test_non_success_status_is_rejected() {
    let base_url = start_provider().await;
    let client = client(&base_url, Duration::from_secs(5));

    match client.lookup("Muse", "missing").await {
        Err(EnrichmentError::Rejected { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such song");
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_undecodable_body_is_malformed() {
    let base_url = start_provider().await;
    let client = client(&base_url, Duration::from_secs(5));

    let result = client.lookup("Muse", "garbage").await;
    assert!(matches!(result, Err(EnrichmentError::Malformed(_))));
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let base_url = start_provider().await;
    let client = client(&base_url, Duration::from_millis(100));

    let result = client.lookup("Muse", "slow").await;
    assert!(matches!(result, Err(EnrichmentError::Unavailable(_))));
}

#[tokio::test]
async fn test_closed_port_is_unavailable() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{}", addr), Duration::from_secs(2));
    let result = client.lookup("Muse", "Uprising").await;
    assert!(matches!(result, Err(EnrichmentError::Unavailable(_))));
}
