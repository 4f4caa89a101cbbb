//! Small HTTP client shared by the scrapers and the social API client.
//!
//! - Per-request options: headers, `Auth`, query params, timeout, retries
//! - JSON (`get_json`) and text (`get_text`) bodies over the same send path
//! - Never logs secret values: cookies and secret query params are redacted
//!   before they reach `tracing`
//! - Retries are opt-in (`with_retries`); 429/5xx back off exponentially and
//!   honour `Retry-After`
//! - Raw request/response logging (target `http.raw`) with `GLEANER_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), gleaner_http::HttpError> {
//! let client = gleaner_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", gleaner_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```

mod user_agent;

pub use reqwest::StatusCode;
pub use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
pub use user_agent::{BROWSER_USER_AGENT, UserAgentPool};

use reqwest::header::{COOKIE, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, Method, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::sleep;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "GLEANER_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024;
const SNIPPET_MAX: usize = 500;

const SECRET_KEYS: &[&str] = &[
    "access_token",
    "auth",
    "key",
    "api_key",
    "token",
    "secret",
    "client_secret",
    "sessionid",
    "cookie",
];

static REQUEST_SEQ: AtomicU64 = AtomicU64::new(1);

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

fn is_secret(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    SECRET_KEYS.contains(&lower.as_str())
}

/// Headers as loggable pairs with credentials blanked out.
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let val = if is_secret(&key) {
                "<redacted>".to_string()
            } else {
                v.to_str().unwrap_or("").to_string()
            };
            (key, val)
        })
        .collect()
}

/// Best-effort curl line for reproducing a request, secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{method}")];
    for (name, val) in redact_headers(headers) {
        parts.push(format!("-H '{}: {}'", name, val.replace('\'', r"'\''")));
    }
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = redact_pairs(url);
    if !pairs.is_empty() {
        shown.query_pairs_mut().clear().extend_pairs(pairs);
    }
    parts.push(format!("'{}'", shown.as_str()));
    parts.join(" ")
}

fn redact_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| {
            let v = if is_secret(&k) {
                "<redacted>".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

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

impl HttpError {
    /// HTTP status for `Api` errors, `None` for transport/decoding failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ==============================
// Auth & Request Options
// ==============================

/// How a request authenticates itself.
///
/// ```
/// use gleaner_http::Auth;
///
/// let auth = Auth::Cookie { name: "sessionid", value: "abc" };
/// assert_eq!(auth.kind(), "cookie");
/// ```
#[derive(Clone, Debug, Default)]
pub enum Auth<'a> {
    /// Session cookie, sent as `Cookie: name=value`.
    Cookie { name: &'a str, value: &'a str },
    #[default]
    None,
}

impl Auth<'_> {
    /// Short label safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            Auth::Cookie { .. } => "cookie",
            Auth::None => "none",
        }
    }
}

/// Per-request tuning knobs.
///
/// ```
/// use gleaner_http::RequestOpts;
/// use std::borrow::Cow;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(10)),
///     query: Some(vec![("count", Cow::Borrowed("50"))]),
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 10);
/// assert!(!opts.allow_absolute);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub retries: Option<usize>,
    pub auth: Auth<'a>,
    pub headers: Option<HeaderMap>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>,
    /// If true and `path` is an absolute URL, use it as-is (ignore base).
    pub allow_absolute: bool,
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
    pub user_agent: Option<String>,
}

impl HttpClient {
    /// Construct a client anchored to a base URL. No retries by default.
    ///
    /// ```no_run
    /// use gleaner_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// assert_eq!(client.max_retries, 0);
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
            max_retries: 0,
            user_agent: None,
        })
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// Fixed `User-Agent` sent with every request unless the caller's own
    /// headers already carry one.
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// GET and decode a JSON body.
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let body = self.send(Method::GET, path, opts).await?;
        serde_json::from_slice::<T>(&body.bytes).map_err(|e| {
            let snippet = snip_body(&body.bytes);
            tracing::warn!(
                req_id = %body.req_id,
                serde_line = e.line(),
                serde_col = e.column(),
                serde_err = %e,
                body_snippet = %snippet,
                "http.response.decode_error"
            );
            HttpError::Decode(e.to_string(), snippet)
        })
    }

    /// GET a text body (HTML pages). Invalid UTF-8 is replaced, not rejected.
    pub async fn get_text(&self, path: &str, opts: RequestOpts<'_>) -> Result<String, HttpError> {
        let body = self.send(Method::GET, path, opts).await?;
        Ok(String::from_utf8_lossy(&body.bytes).into_owned())
    }

    fn resolve(&self, path: &str, allow_absolute: bool) -> Result<Url, HttpError> {
        if allow_absolute {
            if let Ok(abs) = Url::parse(path) {
                return Ok(abs);
            }
        }
        self.base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))
    }

    fn build_headers(&self, opts: &RequestOpts<'_>) -> Result<HeaderMap, HttpError> {
        let mut headers = opts.headers.clone().unwrap_or_default();
        if let Some(ua) = &self.user_agent {
            if !headers.contains_key(USER_AGENT) {
                let value = HeaderValue::from_str(ua)
                    .map_err(|e| HttpError::Build(format!("invalid user agent: {e}")))?;
                headers.insert(USER_AGENT, value);
            }
        }
        if let Auth::Cookie { name, value } = &opts.auth {
            let value = sanitize_secret(value)?;
            let cookie = HeaderValue::from_str(&format!("{name}={value}"))
                .map_err(|e| HttpError::Build(format!("invalid cookie: {e}")))?;
            headers.append(COOKIE, cookie);
        }
        Ok(headers)
    }

    fn build_url(&self, path: &str, opts: &RequestOpts<'_>) -> Result<Url, HttpError> {
        let mut url = self.resolve(path, opts.allow_absolute)?;
        let extra: Vec<(&str, &str)> = opts
            .query
            .iter()
            .flatten()
            .map(|(k, v)| (*k, v.as_ref()))
            .collect();
        if !extra.is_empty() {
            url.query_pairs_mut().extend_pairs(extra);
        }
        Ok(url)
    }

    // ==============================
    // Core send loop
    // ==============================

    async fn send(
        &self,
        method: Method,
        path: &str,
        opts: RequestOpts<'_>,
    ) -> Result<RawBody, HttpError> {
        let url = self.build_url(path, &opts)?;
        let headers = self.build_headers(&opts)?;
        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let max_retries = opts.retries.unwrap_or(self.max_retries);
        let auth_kind = opts.auth.kind();
        let req_id = format!("r{}", REQUEST_SEQ.fetch_add(1, Ordering::Relaxed));

        let mut attempt = 0usize;
        loop {
            tracing::debug!(
                req_id = %req_id,
                attempt = attempt + 1,
                max_retries,
                method = %method,
                host_path = %format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
                query = ?redact_pairs(&url),
                timeout_ms = timeout.as_millis() as u64,
                auth_kind,
                "http.request.start"
            );
            if raw_enabled() {
                let curl = make_curl(&method, &url, &headers);
                tracing::debug!(target: "http.raw", %req_id, %curl, "request");
            }

            let started = Instant::now();
            let sent = self
                .inner
                .request(method.clone(), url.clone())
                .timeout(timeout)
                .headers(headers.clone())
                .send()
                .await;

            let outcome = match sent {
                Ok(resp) => {
                    let status = resp.status();
                    let resp_headers = resp.headers().clone();
                    resp.bytes()
                        .await
                        .map(|b| (status, resp_headers, b.to_vec()))
                        .map_err(|e| e.to_string())
                }
                Err(e) => Err(e.to_string()),
            };

            let (status, resp_headers, bytes) = match outcome {
                Ok(parts) => parts,
                Err(message) => {
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            req_id = %req_id,
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            message = %message,
                            "http.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(req_id = %req_id, attempt, message = %message, "http.network_error");
                    return Err(HttpError::Network(message));
                }
            };

            tracing::debug!(
                req_id = %req_id,
                %status,
                duration_ms = started.elapsed().as_millis() as u64,
                body_len = bytes.len(),
                "http.response.headers"
            );
            if raw_enabled() {
                let shown = &bytes[..bytes.len().min(RAW_MAX_BODY)];
                tracing::info!(
                    target: "http.raw",
                    %req_id,
                    %status,
                    headers = ?redact_headers(&resp_headers),
                    body = %String::from_utf8_lossy(shown),
                    truncated = bytes.len() > RAW_MAX_BODY
                );
            }

            if status.is_success() {
                return Ok(RawBody { req_id, bytes });
            }

            let message = extract_error_message(&bytes);
            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if retryable && attempt < max_retries {
                attempt += 1;
                let delay = retry_after(&resp_headers).unwrap_or_else(|| {
                    let exp = backoff(attempt);
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        exp.max(Duration::from_millis(1100))
                    } else {
                        exp
                    }
                });
                tracing::warn!(
                    req_id = %req_id,
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

            tracing::warn!(
                req_id = %req_id,
                %status,
                message = %message,
                body_snippet = %snip_body(&bytes),
                "http.error"
            );
            return Err(HttpError::Api { status, message });
        }
    }
}

struct RawBody {
    req_id: String,
    bytes: Vec<u8>,
}

// ==============================
// Helpers
// ==============================

fn backoff(attempt: usize) -> Duration {
    let shift = attempt.saturating_sub(1).min(16) as u32;
    Duration::from_millis(200u64.saturating_mul(1u64 << shift))
}

fn retry_after(h: &HeaderMap) -> Option<Duration> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .trim()
        .parse()
        .ok()
        .map(Duration::from_secs)
}

/// Pull a human message out of common error envelopes, falling back to a
/// truncated body.
fn extract_error_message(body: &[u8]) -> String {
    // {"message": "...", "status": "fail"} or {"detail": "..."} or {"error": "..."}
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        for candidate in [m.message, m.detail, m.error] {
            if !candidate.is_empty() {
                return candidate;
            }
        }
    }
    snip_body(body)
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).into_owned();
    if snip.len() > SNIPPET_MAX {
        let mut cut = SNIPPET_MAX;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

/// Trim quotes/whitespace pasted along with a credential and reject bytes
/// that cannot travel in a header.
fn sanitize_secret(raw: &str) -> Result<String, HttpError> {
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    s.retain(|ch| !ch.is_ascii_whitespace());

    if !s.is_ascii() {
        return Err(HttpError::Build("credential contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build("credential contains control characters".into()));
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_redacted_from_query() {
        let url = Url::parse("https://x.test/a?count=50&token=abc&sessionid=zzz").unwrap();
        let pairs = redact_pairs(&url);
        assert_eq!(pairs[0], ("count".into(), "50".into()));
        assert_eq!(pairs[1].1, "<redacted>");
        assert_eq!(pairs[2].1, "<redacted>");
    }

    #[test]
    fn cookie_header_is_redacted() {
        let mut h = HeaderMap::new();
        h.insert(COOKIE, HeaderValue::from_static("sessionid=secret"));
        h.insert(USER_AGENT, HeaderValue::from_static("ua"));
        let shown = redact_headers(&h);
        assert!(shown.contains(&("cookie".into(), "<redacted>".into())));
        assert!(shown.contains(&("user-agent".into(), "ua".into())));
    }

    #[test]
    fn cookie_auth_sends_trimmed_session_cookie() {
        let client = HttpClient::new("https://x.test/").unwrap();
        let opts = RequestOpts {
            auth: Auth::Cookie { name: "sessionid", value: " 'abc' " },
            ..Default::default()
        };
        let headers = client.build_headers(&opts).unwrap();
        assert_eq!(headers.get(COOKIE).unwrap(), "sessionid=abc");
        assert_eq!(opts.auth.kind(), "cookie");
    }

    #[test]
    fn no_auth_adds_no_credentials() {
        let client = HttpClient::new("https://x.test/").unwrap();
        let opts = RequestOpts::default();
        assert_eq!(opts.auth.kind(), "none");
        assert!(client.build_headers(&opts).unwrap().get(COOKIE).is_none());
        let url = client.build_url("a", &opts).unwrap();
        assert_eq!(url.as_str(), "https://x.test/a");
    }

    #[test]
    fn sanitize_strips_quotes_and_spaces() {
        assert_eq!(sanitize_secret(" \"ab c\" ").unwrap(), "abc");
        assert!(sanitize_secret("caf\u{e9}").is_err());
    }

    #[test]
    fn error_message_prefers_envelope_fields() {
        assert_eq!(
            extract_error_message(br#"{"message":"Please wait a few minutes","status":"fail"}"#),
            "Please wait a few minutes"
        );
        assert_eq!(extract_error_message(b"plain text"), "plain text");
    }

    #[test]
    fn backoff_doubles() {
        assert_eq!(backoff(1), Duration::from_millis(200));
        assert_eq!(backoff(2), Duration::from_millis(400));
        assert_eq!(backoff(3), Duration::from_millis(800));
    }

    #[test]
    fn snippet_truncates_on_char_boundary() {
        let body = "é".repeat(400);
        let snip = snip_body(body.as_bytes());
        assert!(snip.ends_with("..."));
        assert!(snip.len() <= SNIPPET_MAX + 3);
    }
}
