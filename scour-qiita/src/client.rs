//! Thin wrapper around the Qiita items search endpoint.
//!
//! Handles auth and request parameter shaping before delegating to the shared
//! HTTP client. The search term travels as a query pair, so percent-encoding
//! is handled by the HTTP layer rather than by string concatenation.

use crate::types::{self, SearchResult};
use crate::FetchError;
use scour_http::{Auth, HttpClient, RequestOpts};
use std::borrow::Cow;
use std::time::Duration;

const QIITA_API_BASE: &str = "https://qiita.com";
const ITEMS_PATH: &str = "api/v2/items";
const DEFAULT_PER_PAGE: u32 = 100;

#[derive(Clone)]
pub struct QiitaApi {
    http: HttpClient,
    token: String,
    per_page: u32,
}

impl QiitaApi {
    pub fn new(token: String) -> Self {
        let http = HttpClient::new(QIITA_API_BASE).expect("qiita base url");
        Self {
            http,
            token,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Point the client at a different host (tests, self-hosted mirrors).
    pub fn with_base(base: &str, token: String) -> Result<Self, FetchError> {
        let http = HttpClient::new(base).map_err(|e| FetchError::Endpoint(e.to_string()))?;
        Ok(Self {
            http,
            token,
            per_page: DEFAULT_PER_PAGE,
        })
    }

    /// Page size for the single fetched page. The API caps this at 100.
    pub fn with_per_page(mut self, n: u32) -> Self {
        self.per_page = n.clamp(1, 100);
        self
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.http = self.http.with_timeout(dur);
        self
    }

    /// Fetch the first page of items whose body matches `query`.
    ///
    /// Returns the well-formed records in response order; malformed entries
    /// are dropped. Transport failures, non-2xx statuses, and non-array
    /// bodies surface as [`FetchError`].
    pub async fn search_titles(&self, query: &str) -> Result<Vec<SearchResult>, FetchError> {
        let params: Vec<(&str, Cow<'_, str>)> = vec![
            ("page", "1".into()),
            ("per_page", self.per_page.to_string().into()),
            ("query", format!("body:{query}").into()),
        ];

        let raw: Vec<serde_json::Value> = self
            .http
            .get_json(
                ITEMS_PATH,
                RequestOpts {
                    auth: Auth::Bearer(&self.token),
                    query: Some(params),
                    retries: Some(1),
                    ..Default::default()
                },
            )
            .await?;

        let results = types::parse_items(raw);
        tracing::debug!(query, count = results.len(), "qiita search decoded");
        Ok(results)
    }
}
