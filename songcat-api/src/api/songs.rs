//! Song catalog endpoints
//!
//! - GET    /songs?group=&song=&page=&limit=
//! - POST   /songs
//! - GET    /songs/:id
//! - PUT    /songs/:id
//! - DELETE /songs/:id
//! - GET    /songs/:id/lyrics?page=&limit=

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use songcat_common::db::{NewSong, Song, SongFields};
use songcat_common::pagination::{DEFAULT_LIST_LIMIT, DEFAULT_LYRICS_LIMIT};
use songcat_common::{PageRequest, VersePage};

use crate::catalog::{SongFilter, SongListing};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Listing query parameters, kept as raw strings so bad numbers become 400s
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub group: Option<String>,
    pub song: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Confirmation body for update and delete
#[derive(Debug, Serialize)]
pub struct WriteConfirmation {
    pub message: String,
    pub rows_affected: u64,
}

/// GET /songs
pub async fn list_songs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<SongListing>> {
    let page = PageRequest::parse(
        params.page.as_deref(),
        params.limit.as_deref(),
        DEFAULT_LIST_LIMIT,
    )?;
    let filter = SongFilter::new(params.group, params.song);

    let listing = state.catalog.list(&filter, page).await?;
    Ok(Json(listing))
}

/// POST /songs
///
/// Looks the song up with the provider before inserting it. Returns 201
/// with the stored record.
pub async fn create_song(
    State(state): State<AppState>,
    body: Result<Json<NewSong>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    let Json(input) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let song = state.catalog.create(input, &state.shutdown).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

/// GET /songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Song>> {
    let id = parse_id(&id)?;
    let song = state.catalog.get_song(id).await?;
    Ok(Json(song))
}

/// PUT /songs/:id
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<SongFields>, JsonRejection>,
) -> ApiResult<Json<WriteConfirmation>> {
    let id = parse_id(&id)?;
    let Json(fields) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let rows_affected = state.catalog.update(id, fields).await?;
    Ok(Json(WriteConfirmation {
        message: "Song updated successfully".to_string(),
        rows_affected,
    }))
}

/// DELETE /songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WriteConfirmation>> {
    let id = parse_id(&id)?;

    let rows_affected = state.catalog.delete(id).await?;
    Ok(Json(WriteConfirmation {
        message: "Song deleted successfully".to_string(),
        rows_affected,
    }))
}

/// GET /songs/:id/lyrics
pub async fn get_lyrics(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<VersePage>> {
    let id = parse_id(&id)?;
    let page = PageRequest::parse(
        params.page.as_deref(),
        params.limit.as_deref(),
        DEFAULT_LYRICS_LIMIT,
    )?;

    let verses = state.catalog.lyrics_page(id, page).await?;
    Ok(Json(verses))
}

fn parse_id(raw: &str) -> ApiResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::BadRequest(format!("Invalid song id: {}", raw))),
    }
}

/// Build song routes
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route(
            "/songs/:id",
            get(get_song).put(update_song).delete(delete_song),
        )
        .route("/songs/:id/lyrics", get(get_lyrics))
}
