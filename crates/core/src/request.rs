//! Request identity and captured responses.
//!
//! ### URL Canonicalization
//! - Trim whitespace; relative paths are joined onto the origin
//! - Lowercase host, remove fragments
//! - Preserve query string

use url::Url;

use crate::Error;
use crate::cache::hash::compute_request_key;

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize an absolute URL string so equivalent requests share a key.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Lowercase the host
/// 3. Remove fragment (#...)
/// 4. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    normalize(parsed)
}

/// Resolve a path or absolute URL against the origin, then canonicalize.
///
/// `"/index.html"` against `http://localhost:8080` gives
/// `http://localhost:8080/index.html`; absolute inputs ignore the origin.
pub fn resolve(origin: &Url, input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let joined = match Url::parse(trimmed) {
        Ok(absolute) => absolute,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            origin.join(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?
        }
        Err(e) => return Err(UrlError::InvalidUrl(e.to_string())),
    };

    normalize(joined)
}

fn normalize(mut parsed: Url) -> Result<Url, UrlError> {
    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str() {
        let lower = host.to_lowercase();
        parsed
            .set_host(Some(&lower))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

const NORMALIZED_METHODS: [&str; 6] = ["DELETE", "GET", "HEAD", "OPTIONS", "POST", "PUT"];

/// Token characters allowed in an HTTP method (RFC 9110 `tchar`).
fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// An intercepted or manifest request: method plus canonical URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub url: Url,
}

impl Request {
    /// Build a GET request.
    pub fn get(url: Url) -> Self {
        Self { method: "GET".to_string(), url }
    }

    /// Build a request with an arbitrary method.
    ///
    /// The method must be a non-empty HTTP token. The standard methods are
    /// matched case-insensitively and uppercased; any other token is kept
    /// as given.
    pub fn new(method: &str, url: Url) -> Result<Self, Error> {
        let method = method.trim();
        if method.is_empty() || !method.bytes().all(is_tchar) {
            return Err(Error::InvalidInput(format!("invalid method: {method:?}")));
        }
        let method = match NORMALIZED_METHODS.iter().find(|m| m.eq_ignore_ascii_case(method)) {
            Some(standard) => (*standard).to_string(),
            None => method.to_string(),
        };
        Ok(Self { method, url })
    }

    /// Stable store key for this request.
    pub fn key(&self) -> String {
        compute_request_key(&self.method, self.url.as_str())
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// A captured response: what the network returned, or what the store holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// URL the response was served from (after redirects).
    pub url: String,
    pub status: u16,
    /// Header pairs in received order. Names are lowercase.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// True for 2xx statuses.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value with the given name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}
