//! Song storage collaborator
//!
//! The catalog service only talks to storage through [`SongStore`]. Each
//! call is a single bounded operation; there are no multi-row transactions.

mod sqlite;

pub use sqlite::{SqliteSongStore, DEFAULT_STORAGE_TIMEOUT};

use async_trait::async_trait;
use songcat_common::db::{NewSong, Song, SongFields};
use std::time::Duration;
use thiserror::Error;

use crate::catalog::SongQuery;
use crate::enrichment::SongDetails;

/// Storage layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage call timed out after {0:?}")]
    Timeout(Duration),
}

/// Row-level access to the songs collection
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Rows matching every predicate, ordered by ascending id, bounded by limit/offset
    async fn select(&self, query: &SongQuery) -> Result<Vec<Song>, StoreError>;

    /// One row by id
    async fn get(&self, id: i64) -> Result<Option<Song>, StoreError>;

    /// Insert a new row and return it with its assigned id
    async fn insert(&self, song: &NewSong, details: &SongDetails) -> Result<Song, StoreError>;

    /// Replace every mutable field; returns rows affected
    async fn update(&self, id: i64, fields: &SongFields) -> Result<u64, StoreError>;

    /// Returns rows affected
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;
}
