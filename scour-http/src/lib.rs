//! Minimal HTTP client with safe logging, retries, and bearer auth.
//!
//! - Request options: query params, `Auth`, timeout, retry budget
//! - Redacts sensitive query params and never logs secret values
//! - Retries 429/5xx with exponential backoff and `Retry-After` support
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), scour_http::HttpError> {
//! let client = scour_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", scour_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Security: `Auth::Bearer` values are sanitized before use, and logs only
//! ever include the auth kind (bearer/none), not the secret.

use reqwest::header::{HeaderValue, RETRY_AFTER};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// Authentication strategies supported by the client.
#[derive(Clone, Copy, Debug, Default)]
pub enum Auth<'a> {
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    #[default]
    None,
}

/// Per-request tuning knobs.
///
/// ```
/// use scour_http::{Auth, RequestOpts};
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     retries: Some(1),
///     auth: Auth::Bearer("token"),
///     ..Default::default()
/// };
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub retries: Option<usize>,
    pub auth: Auth<'a>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>, // e.g. [("q", "term".into())]
}

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use scour_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// assert_eq!(client.max_retries, 2);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
            max_retries: 2,
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// Override the default retry budget returned by [`HttpClient::new`].
    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// GET JSON with per-request options (query/auth/timeout/retries).
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;

        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let max_retries = opts.retries.unwrap_or(self.max_retries);
        let auth_kind = match opts.auth {
            Auth::Bearer(_) => "bearer",
            Auth::None => "none",
        };

        let mut attempt = 0usize;
        loop {
            let mut rb = self.inner.get(url.clone()).timeout(timeout);

            if let Some(q) = &opts.query {
                let pairs: Vec<(&str, &str)> = q.iter().map(|(k, v)| (*k, v.as_ref())).collect();
                rb = rb.query(&pairs);
            }

            if let Auth::Bearer(tok) = opts.auth {
                rb = rb.bearer_auth(sanitize_api_key(tok)?);
            }

            tracing::debug!(
                attempt = attempt + 1,
                max_retries,
                host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
                query = ?redact_query(opts.query.as_deref()),
                timeout_ms = timeout.as_millis() as u64,
                auth_kind,
                "http.request.start"
            );

            let t0 = std::time::Instant::now();
            let resp = match rb.send().await {
                Ok(resp) => resp,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff_delay(attempt);
                        tracing::warn!(
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            message = %message,
                            "http.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(attempt, message = %message, "http.network_error");
                    return Err(HttpError::Network(message));
                }
            };

            let status = resp.status();
            let headers = resp.headers().clone();
            let bytes = match resp.bytes().await {
                Ok(bytes) => bytes,
                Err(err) => {
                    tracing::warn!(message = %err.to_string(), "http.network_error.body");
                    return Err(HttpError::Network(err.to_string()));
                }
            };

            let snippet = snip_body(&bytes);
            tracing::debug!(
                %status,
                duration_ms = t0.elapsed().as_millis() as u64,
                body_len = bytes.len(),
                "http.response"
            );

            if status.is_success() {
                return serde_json::from_slice::<T>(&bytes).map_err(|e| {
                    tracing::warn!(
                        serde_err = %e.to_string(),
                        body_snippet = %snippet,
                        "http.response.decode_error"
                    );
                    HttpError::Decode(e.to_string(), snippet)
                });
            }

            let message = extract_error_message(&bytes);
            let is_429 = status == StatusCode::TOO_MANY_REQUESTS;
            if (is_429 || status.is_server_error()) && attempt < max_retries {
                attempt += 1;
                let delay = match retry_after_delay_secs(&headers) {
                    Some(secs) => Duration::from_secs(secs),
                    None if is_429 => backoff_delay(attempt).max(Duration::from_millis(1100)),
                    None => backoff_delay(attempt),
                };
                tracing::warn!(
                    %status,
                    attempt,
                    max_retries,
                    backoff_ms = delay.as_millis() as u64,
                    message = %message,
                    "http.retrying"
                );
                sleep(delay).await;
                continue;
            }

            tracing::warn!(%status, message = %message, body_snippet = %snippet, "http.error");
            return Err(HttpError::Api { status, message });
        }
    }
}

fn backoff_delay(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt - 1)))
}

/// Pull a human-readable message out of common error body shapes.
fn extract_error_message(body: &[u8]) -> String {
    // Qiita style: {"message":"...", "type":"..."}; also accept generic shapes.
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        if !m.message.is_empty() {
            return m.message;
        }
        if !m.error.is_empty() {
            return m.error;
        }
    }
    snip_body(body)
}

fn retry_after_delay_secs(h: &reqwest::header::HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .parse()
        .ok()
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        snip.truncate(500);
        snip.push_str("...");
    }
    snip
}

fn redact_query(query: Option<&[(&str, Cow<'_, str>)]>) -> Vec<(String, String)> {
    query
        .map(|q| {
            q.iter()
                .map(|(k, v)| {
                    let is_secret = matches!(
                        k.to_ascii_lowercase().as_str(),
                        "access_token" | "authorization" | "auth" | "key" | "api_key" | "token"
                            | "secret" | "client_secret" | "bearer"
                    );
                    (
                        (*k).to_string(),
                        if is_secret {
                            "<redacted>".to_string()
                        } else {
                            v.as_ref().to_string()
                        },
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

fn sanitize_api_key(raw: &str) -> Result<String, HttpError> {
    // Trim outer spaces/quotes, then strip all ASCII whitespace.
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    s.retain(|ch| !ch.is_ascii_whitespace());

    if !s.is_ascii() {
        return Err(HttpError::Build("API key contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "API key contains control characters".into(),
        ));
    }

    // Validate header value upfront for clear errors.
    HeaderValue::from_str(&format!("Bearer {}", s))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(s)
}
