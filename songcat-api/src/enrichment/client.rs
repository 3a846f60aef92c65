//! HTTP song info client
//!
//! Issues `GET {base_url}/info?group=..&song=..` and decodes the JSON body.
//! The reqwest client carries the configured timeout, so a provider that
//! stalls surfaces as [`EnrichmentError::Unavailable`].

use async_trait::async_trait;
use std::time::Duration;

use super::{EnrichmentError, SongDetails, SongInfoProvider};

/// Provider lookup path appended to the base URL
pub const INFO_PATH: &str = "/info";

/// Longest slice of a rejection body kept for error reporting
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Song info provider over HTTP
#[derive(Debug, Clone)]
pub struct HttpSongInfoClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpSongInfoClient {
    /// Create new client for the provider at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| EnrichmentError::Unavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Full lookup URL (without query string)
    pub fn info_url(&self) -> String {
        format!("{}{}", self.base_url, INFO_PATH)
    }

    /// Fetch release date, lyrics and link for one song
    pub async fn fetch_song_info(
        &self,
        group: &str,
        song: &str,
    ) -> Result<SongDetails, EnrichmentError> {
        let url = self.info_url();

        tracing::debug!(group = %group, song = %song, url = %url, "Querying song info provider");

        let response = self
            .http_client
            .get(&url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| EnrichmentError::Unavailable(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let body: String = error_text.chars().take(MAX_ERROR_BODY_CHARS).collect();
            tracing::warn!(
                group = %group,
                song = %song,
                status = status.as_u16(),
                "Song info provider rejected lookup"
            );
            return Err(EnrichmentError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| EnrichmentError::Unavailable(e.to_string()))?;

        let details = SongDetails::from_json_slice(&bytes)?;

        tracing::info!(
            group = %group,
            song = %song,
            has_lyrics = !details.lyrics.is_empty(),
            has_release_date = !details.release_date.is_empty(),
            "Song info lookup successful"
        );

        Ok(details)
    }
}

#[async_trait]
impl SongInfoProvider for HttpSongInfoClient {
    async fn lookup(&self, group: &str, song: &str) -> Result<SongDetails, EnrichmentError> {
        self.fetch_song_info(group, song).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpSongInfoClient::new("http://provider.local/", Duration::from_secs(1), "test");
        assert!(client.is_ok());
    }

    #[test]
    fn test_info_url_joins_path() {
        let client =
            HttpSongInfoClient::new("http://provider.local/api/", Duration::from_secs(1), "test")
                .unwrap();
        assert_eq!(client.info_url(), "http://provider.local/api/info");
    }
}
