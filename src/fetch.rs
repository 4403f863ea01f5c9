//! Fetching remote resources over HTTP

use thiserror::Error;

/// The outcome of one completed HTTP exchange: the response status and the full body.
///
/// A non-success status is not an error at this level; callers that treat it as one use
/// [FetchResponse::success].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    status: u16,
    body: Vec<u8>,
}

impl FetchResponse {
    /// Creates a response from a status code and body bytes.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The response body, discarding the status.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// The response body, or a [FetchError::Status] if the status is not 2xx.
    pub fn success(self, url: &str) -> Result<Vec<u8>, FetchError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(FetchError::Status {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// An error during fetching a resource from the web
#[derive(Error, Debug)]
pub enum FetchError {
    /// A network error during the fetch
    #[error("network I/O error during fetch")]
    Network(#[from] reqwest::Error),
    /// The server answered with a non-success status where a body was required
    #[error("server answered {status} for {url}")]
    Status {
        /// The requested URL
        url: String,
        /// The HTTP status code
        status: u16,
    },
}

/// Derives a file name from a URL: the substring after the last `/`. Returns `None` if that
/// substring is empty (e.g. for URLs ending in a slash).
pub fn url_file_name(url: &str) -> Option<&str> {
    let name = url.rsplit('/').next().unwrap_or(url);
    (!name.is_empty()).then_some(name)
}

/// Appends a file name to a base URL, inserting a `/` unless the base already ends in one.
pub fn join_url(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}
