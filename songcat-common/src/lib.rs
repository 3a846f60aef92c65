//! # Song Catalog Common Library
//!
//! Shared code for the song catalog service:
//! - Song record shapes and database initialization
//! - Bootstrap configuration loading
//! - Page/limit arithmetic and verse pagination
//! - Common error type

pub mod config;
pub mod db;
pub mod error;
pub mod pagination;
pub mod verses;

pub use error::{Error, Result};
pub use pagination::PageRequest;
pub use verses::VersePage;
