//! Catalog query planning
//!
//! Turns list filters plus paging into a [`SongQuery`]: a set of
//! case-insensitive substring predicates (combined with AND), a limit, an
//! offset, and a fixed ordering by ascending `id`. The planner never
//! touches storage and never formats filter text into SQL; storage
//! implementations bind every needle as a parameter, folded with
//! [`fold_case`](songcat_common::db::fold_case).

use songcat_common::PageRequest;

/// Optional list filters; an empty string means "no filter"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub song: Option<String>,
}

impl SongFilter {
    pub fn new(group: Option<String>, song: Option<String>) -> Self {
        Self {
            group: normalise(group),
            song: normalise(song),
        }
    }
}

fn normalise(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Single filter condition over a song column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongPredicate {
    /// `group_name` contains the needle, ignoring case
    GroupContains(String),
    /// `song_name` contains the needle, ignoring case
    SongContains(String),
}

impl SongPredicate {
    /// Case-folded column the predicate matches against (fixed identifiers only)
    pub fn column(&self) -> &'static str {
        match self {
            SongPredicate::GroupContains(_) => "group_name_folded",
            SongPredicate::SongContains(_) => "song_name_folded",
        }
    }

    pub fn needle(&self) -> &str {
        match self {
            SongPredicate::GroupContains(needle) | SongPredicate::SongContains(needle) => needle,
        }
    }
}

/// Bounded, ordered fetch over the songs collection
///
/// Rows are always ordered by ascending `id`, which makes repeated calls
/// with the same filters and paging return the same window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub predicates: Vec<SongPredicate>,
    pub limit: i64,
    pub offset: i64,
}

impl SongQuery {
    /// Plan a fetch for `filter` on the requested page
    pub fn plan(filter: &SongFilter, page: &PageRequest) -> Self {
        let mut predicates = Vec::new();
        if let Some(group) = &filter.group {
            predicates.push(SongPredicate::GroupContains(group.clone()));
        }
        if let Some(song) = &filter.song {
            predicates.push(SongPredicate::SongContains(song.clone()));
        }

        Self {
            predicates,
            limit: page.limit(),
            offset: page.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_no_predicates() {
        let query = SongQuery::plan(&SongFilter::default(), &PageRequest::new(1, 10).unwrap());
        assert!(query.predicates.is_empty());
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn test_empty_filters_are_dropped() {
        let filter = SongFilter::new(Some(String::new()), Some(String::new()));
        assert_eq!(filter, SongFilter::default());
    }

    #[test]
    fn test_whitespace_filter_is_kept_verbatim() {
        let filter = SongFilter::new(Some(" ".to_string()), None);
        assert_eq!(filter.group.as_deref(), Some(" "));

        let query = SongQuery::plan(&filter, &PageRequest::new(1, 10).unwrap());
        assert_eq!(query.predicates, vec![SongPredicate::GroupContains(" ".to_string())]);
    }

    #[test]
    fn test_both_filters_and_offset() {
        let filter = SongFilter::new(Some("muse".to_string()), Some("hole".to_string()));
        let query = SongQuery::plan(&filter, &PageRequest::new(3, 5).unwrap());

        assert_eq!(
            query.predicates,
            vec![
                SongPredicate::GroupContains("muse".to_string()),
                SongPredicate::SongContains("hole".to_string()),
            ]
        );
        assert_eq!(query.predicates[0].column(), "group_name_folded");
        assert_eq!(query.predicates[1].column(), "song_name_folded");
        assert_eq!(query.limit, 5);
        assert_eq!(query.offset, 10);
    }
}
