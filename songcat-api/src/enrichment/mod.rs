//! Song metadata enrichment
//!
//! New songs arrive with only a group and a title. Release date, lyrics and
//! a source link come from an external song info provider, looked up once
//! per create.
//!
//! The provider sits behind [`SongInfoProvider`] so the catalog service can
//! be handed a test double instead of the HTTP client.

mod client;

pub use client::{HttpSongInfoClient, INFO_PATH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Song info provider errors
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Connection, timeout or body transfer failure
    #[error("Network error: {0}")]
    Unavailable(String),

    /// Provider answered with a non-success status
    #[error("Provider returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Provider body could not be decoded
    #[error("Parse error: {0}")]
    Malformed(String),
}

/// Fields filled in by the provider
///
/// Accepted field names:
/// - release date: `releaseDate`, `release_date`, `released`
/// - lyrics: `text`, `lyrics`
/// - link: `link`, `url`
///
/// Absent fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongDetails {
    #[serde(rename = "releaseDate", alias = "release_date", alias = "released")]
    pub release_date: String,
    #[serde(rename = "text", alias = "lyrics")]
    pub lyrics: String,
    #[serde(alias = "url")]
    pub link: String,
}

impl SongDetails {
    /// Decode a provider response body
    ///
    /// The body must be a JSON object; anything else is malformed.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, EnrichmentError> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| EnrichmentError::Malformed(format!("invalid JSON: {}", e)))?;

        if !value.is_object() {
            return Err(EnrichmentError::Malformed(
                "expected a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| EnrichmentError::Malformed(format!("unexpected field type: {}", e)))
    }
}

/// External song info lookup
#[async_trait]
pub trait SongInfoProvider: Send + Sync {
    /// Look up one song by group and title
    ///
    /// Exactly one round trip; no retries, no state kept between calls.
    async fn lookup(&self, group: &str, song: &str) -> Result<SongDetails, EnrichmentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_primary_field_names() {
        let body = br#"{"releaseDate":"16.07.2006","text":"Ooh baby\nOoh","link":"https://youtu.be/x"}"#;
        let details = SongDetails::from_json_slice(body).unwrap();

        assert_eq!(details.release_date, "16.07.2006");
        assert_eq!(details.lyrics, "Ooh baby\nOoh");
        assert_eq!(details.link, "https://youtu.be/x");
    }

    #[test]
    fn test_decode_alias_field_names() {
        let body = br#"{"release_date":"2006","lyrics":"la","url":"http://x"}"#;
        let details = SongDetails::from_json_slice(body).unwrap();

        assert_eq!(details.release_date, "2006");
        assert_eq!(details.lyrics, "la");
        assert_eq!(details.link, "http://x");
    }

    #[test]
    fn test_decode_missing_fields_default_empty() {
        let details = SongDetails::from_json_slice(br#"{"link":"http://x"}"#).unwrap();
        assert_eq!(details.release_date, "");
        assert_eq!(details.lyrics, "");
        assert_eq!(details.link, "http://x");
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        let bodies: [&[u8]; 4] = [b"not json", b"[]", b"\"text\"", b"null"];
        for body in bodies {
            let result = SongDetails::from_json_slice(body);
            assert!(
                matches!(result, Err(EnrichmentError::Malformed(_))),
                "body {:?} should be malformed",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        let result = SongDetails::from_json_slice(br#"{"releaseDate":1975}"#);
        assert!(matches!(result, Err(EnrichmentError::Malformed(_))));
    }
}
