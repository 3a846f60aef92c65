//! Catalog service
//!
//! Orchestrates listing, lyric paging and the create/update/delete
//! workflows over a [`SongStore`] and a [`SongInfoProvider`], both handed in
//! by the caller.
//!
//! Create is two-phase and non-transactional: enrichment must succeed before
//! any write is issued, and a failed write discards the enrichment result.

use serde::Serialize;
use songcat_common::db::{NewSong, Song, SongFields};
use songcat_common::verses::{paginate_verses, VERSE_DELIMITER};
use songcat_common::{PageRequest, VersePage};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{CatalogError, SongFilter, SongQuery};
use crate::enrichment::{SongDetails, SongInfoProvider};
use crate::storage::{SongStore, StoreError};

/// Default bound on a single enrichment lookup
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// One window of the song listing
///
/// Listing is window-only: no total count is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongListing {
    pub songs: Vec<Song>,
    pub page: i64,
    pub limit: i64,
}

/// Song catalog operations
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn SongStore>,
    provider: Arc<dyn SongInfoProvider>,
    enrichment_timeout: Duration,
}

impl CatalogService {
    pub fn new(store: Arc<dyn SongStore>, provider: Arc<dyn SongInfoProvider>) -> Self {
        Self {
            store,
            provider,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    /// Bound each enrichment lookup; expiry is reported as unavailable
    pub fn with_enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.enrichment_timeout = timeout;
        self
    }

    /// Filtered, paginated listing ordered by ascending id
    pub async fn list(
        &self,
        filter: &SongFilter,
        page: PageRequest,
    ) -> Result<SongListing, CatalogError> {
        let query = SongQuery::plan(filter, &page);
        debug!(?query, "Listing songs");

        let songs = self.store.select(&query).await.map_err(read_failed)?;

        Ok(SongListing {
            songs,
            page: page.page(),
            limit: page.limit(),
        })
    }

    /// Single song by id
    pub async fn get_song(&self, id: i64) -> Result<Song, CatalogError> {
        validate_id(id)?;
        self.store
            .get(id)
            .await
            .map_err(read_failed)?
            .ok_or(CatalogError::NotFound(id))
    }

    /// One page of verses from a song's lyrics
    ///
    /// A page past the last verse yields an empty window, not an error.
    pub async fn lyrics_page(&self, id: i64, page: PageRequest) -> Result<VersePage, CatalogError> {
        let song = self.get_song(id).await?;
        Ok(paginate_verses(&song.lyrics, VERSE_DELIMITER, &page))
    }

    /// Enrich a new song from the provider, then persist it
    ///
    /// `cancel` is checked after enrichment and before the insert; once it
    /// fires nothing is written.
    pub async fn create(
        &self,
        input: NewSong,
        cancel: &CancellationToken,
    ) -> Result<Song, CatalogError> {
        input.validate()?;

        let details = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(CatalogError::Cancelled("enrichment completed"));
            }
            result = self.enrich(&input) => result?,
        };

        if cancel.is_cancelled() {
            info!(
                group = %input.group_name,
                song = %input.song_name,
                "Create cancelled after enrichment, nothing written"
            );
            return Err(CatalogError::Cancelled("the song was persisted"));
        }

        let song = self
            .store
            .insert(&input, &details)
            .await
            .map_err(write_failed)?;

        info!(id = song.id, group = %song.group_name, song = %song.song_name, "Song created");
        Ok(song)
    }

    /// Replace every mutable field of a song; returns rows affected
    ///
    /// No re-enrichment. Zero rows affected is still success.
    pub async fn update(&self, id: i64, fields: SongFields) -> Result<u64, CatalogError> {
        validate_id(id)?;
        fields.validate()?;

        let rows = self
            .store
            .update(id, &fields)
            .await
            .map_err(write_failed)?;

        info!(id, rows_affected = rows, "Song updated");
        Ok(rows)
    }

    /// Delete a song; deleting an absent id succeeds with zero rows
    pub async fn delete(&self, id: i64) -> Result<u64, CatalogError> {
        validate_id(id)?;

        let rows = self.store.delete(id).await.map_err(write_failed)?;

        info!(id, rows_affected = rows, "Song deleted");
        Ok(rows)
    }

    async fn enrich(&self, input: &NewSong) -> Result<SongDetails, CatalogError> {
        let lookup = self.provider.lookup(&input.group_name, &input.song_name);

        match tokio::time::timeout(self.enrichment_timeout, lookup).await {
            Ok(result) => result.map_err(|e| {
                warn!(
                    group = %input.group_name,
                    song = %input.song_name,
                    error = %e,
                    "Enrichment failed, song not created"
                );
                CatalogError::from(e)
            }),
            Err(_) => Err(CatalogError::EnrichmentUnavailable(format!(
                "lookup timed out after {:?}",
                self.enrichment_timeout
            ))),
        }
    }
}

fn validate_id(id: i64) -> Result<(), CatalogError> {
    if id < 1 {
        return Err(CatalogError::InvalidArgument(format!(
            "Song id must be >= 1, got {}",
            id
        )));
    }
    Ok(())
}

fn read_failed(err: StoreError) -> CatalogError {
    CatalogError::StorageUnavailable(err.to_string())
}

fn write_failed(err: StoreError) -> CatalogError {
    CatalogError::StorageWriteFailed(err.to_string())
}
