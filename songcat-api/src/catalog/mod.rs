//! Song catalog: query planning, error taxonomy and the catalog service

mod error;
mod query;
mod service;

pub use error::CatalogError;
pub use query::{SongFilter, SongPredicate, SongQuery};
pub use service::{CatalogService, SongListing, DEFAULT_ENRICHMENT_TIMEOUT};
