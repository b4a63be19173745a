//! Qiita search API client used by the scour pipeline.
//!
//! One operation: fetch the first page of items whose body matches a search
//! term and decode them into [`types::SearchResult`] records. Malformed
//! entries in an otherwise healthy response are tolerated and dropped;
//! transport or whole-body decode failures surface as [`FetchError`].

pub mod client;
pub mod types;

pub use client::QiitaApi;
pub use types::SearchResult;

/// Any transport-level or decode-level failure while fetching search results.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid search endpoint: {0}")]
    Endpoint(String),
    #[error(transparent)]
    Http(#[from] scour_http::HttpError),
}
