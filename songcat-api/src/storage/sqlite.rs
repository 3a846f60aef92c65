//! SQLite-backed song store

use async_trait::async_trait;
use songcat_common::db::{fold_case, NewSong, Song, SongFields};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::future::Future;
use std::time::Duration;

use super::{SongStore, StoreError};
use crate::catalog::SongQuery;
use crate::enrichment::SongDetails;

const SONG_COLUMNS: &str = "id, group_name, song_name, release_date, lyrics, link";

/// Default bound on a single storage call
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Song store over a SQLite connection pool
#[derive(Debug, Clone)]
pub struct SqliteSongStore {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteSongStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

/// Render the query with every filter value bound as a parameter
///
/// Needles are folded with [`fold_case`] and tested with
/// `instr(<name>_folded, ?) > 0` against the folded name columns. This is a
/// plain substring test, so `%` and `_` in filter text match literally.
fn build_select(query: &SongQuery) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM songs", SONG_COLUMNS));

    for (i, predicate) in query.predicates.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push("instr(");
        builder.push(predicate.column());
        builder.push(", ");
        builder.push_bind(fold_case(predicate.needle()));
        builder.push(") > 0");
    }

    builder.push(" ORDER BY id ASC LIMIT ");
    builder.push_bind(query.limit);
    builder.push(" OFFSET ");
    builder.push_bind(query.offset);
    builder
}

#[async_trait]
impl SongStore for SqliteSongStore {
    async fn select(&self, query: &SongQuery) -> Result<Vec<Song>, StoreError> {
        let mut builder = build_select(query);
        self.bounded(builder.build_query_as::<Song>().fetch_all(&self.pool))
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Song>, StoreError> {
        let sql = format!("SELECT {} FROM songs WHERE id = ?", SONG_COLUMNS);
        self.bounded(
            sqlx::query_as::<_, Song>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn insert(&self, song: &NewSong, details: &SongDetails) -> Result<Song, StoreError> {
        let sql = format!(
            "INSERT INTO songs (group_name, song_name, group_name_folded, song_name_folded,
                                release_date, lyrics, link)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {}",
            SONG_COLUMNS
        );
        self.bounded(
            sqlx::query_as::<_, Song>(&sql)
                .bind(&song.group_name)
                .bind(&song.song_name)
                .bind(fold_case(&song.group_name))
                .bind(fold_case(&song.song_name))
                .bind(&details.release_date)
                .bind(&details.lyrics)
                .bind(&details.link)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn update(&self, id: i64, fields: &SongFields) -> Result<u64, StoreError> {
        let result = self
            .bounded(
                sqlx::query(
                    r#"
                    UPDATE songs
                    SET group_name = ?, song_name = ?,
                        group_name_folded = ?, song_name_folded = ?,
                        release_date = ?, lyrics = ?, link = ?,
                        updated_at = CURRENT_TIMESTAMP
                    WHERE id = ?
                    "#,
                )
                .bind(&fields.group_name)
                .bind(&fields.song_name)
                .bind(fold_case(&fields.group_name))
                .bind(fold_case(&fields.song_name))
                .bind(&fields.release_date)
                .bind(&fields.lyrics)
                .bind(&fields.link)
                .bind(id)
                .execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let result = self
            .bounded(
                sqlx::query("DELETE FROM songs WHERE id = ?")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }
}
