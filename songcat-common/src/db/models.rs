//! Song record shapes
//!
//! JSON field names keep the public wire contract (`group`, `song`,
//! `releaseDate`); column names are snake_case.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Persisted song row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Song {
    /// Assigned by the database on insert, never changed afterwards
    pub id: i64,
    #[serde(rename = "group")]
    pub group_name: String,
    #[serde(rename = "song")]
    pub song_name: String,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub lyrics: String,
    pub link: String,
}

/// Create request: the caller names the song, enrichment fills the rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    #[serde(rename = "group")]
    pub group_name: String,
    #[serde(rename = "song")]
    pub song_name: String,
}

impl NewSong {
    pub fn new(group_name: impl Into<String>, song_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            song_name: song_name.into(),
        }
    }

    /// Both names must contain something other than whitespace
    pub fn validate(&self) -> Result<()> {
        require_non_empty("group", &self.group_name)?;
        require_non_empty("song", &self.song_name)
    }
}

/// Full replacement of every mutable song field
///
/// All fields are required in the request body; there is no partial patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongFields {
    #[serde(rename = "group")]
    pub group_name: String,
    #[serde(rename = "song")]
    pub song_name: String,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub lyrics: String,
    pub link: String,
}

impl SongFields {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("group", &self.group_name)?;
        require_non_empty("song", &self.song_name)
    }
}

/// Case-fold a name for substring matching
///
/// Full Unicode lowercase, so `Кино` and `кино` (or `Ärzte` and `ärzte`)
/// fold to the same text. Stored next to each name and applied to filter
/// text before it is bound.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("Field '{}' must not be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_wire_names() {
        let song = Song {
            id: 7,
            group_name: "Muse".to_string(),
            song_name: "Uprising".to_string(),
            release_date: "07.09.2009".to_string(),
            lyrics: "a\nb".to_string(),
            link: "http://x".to_string(),
        };

        let json = serde_json::to_value(&song).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["group"], "Muse");
        assert_eq!(json["song"], "Uprising");
        assert_eq!(json["releaseDate"], "07.09.2009");
    }

    #[test]
    fn test_fold_case_handles_non_ascii() {
        assert_eq!(fold_case("Кино"), "кино");
        assert_eq!(fold_case("ÄRZTE"), "ärzte");
        assert_eq!(fold_case("Muse"), "muse");
        assert_eq!(fold_case("100%_Band"), "100%_band");
    }

    #[test]
    fn test_new_song_validation() {
        assert!(NewSong::new("Muse", "Uprising").validate().is_ok());
        assert!(NewSong::new("", "Uprising").validate().is_err());
        assert!(NewSong::new("Muse", "   ").validate().is_err());
    }

    #[test]
    fn test_song_fields_require_every_field() {
        let missing_link = r#"{"group":"Muse","song":"Uprising","releaseDate":"","lyrics":""}"#;
        assert!(serde_json::from_str::<SongFields>(missing_link).is_err());

        let full = r#"{"group":"Muse","song":"Uprising","releaseDate":"","lyrics":"","link":""}"#;
        let fields: SongFields = serde_json::from_str(full).unwrap();
        assert!(fields.validate().is_ok());
    }
}
