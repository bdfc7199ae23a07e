//! HTTP retrieval of the review page and its images.
//!
//! The [`Fetch`] trait is the seam between the pipeline and the network:
//! [`HttpFetcher`] is the production implementation, tests drive the pipeline
//! with an in-memory fake.
//!
//! A fetch succeeds only on `200 OK`. Any other status is "no data"
//! (`Ok(None)`), not an error; the caller decides what to skip. Transport
//! failures (DNS, connect, truncated body) are errors.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Retrieves the body of a URL.
pub trait Fetch {
    /// Return the full body on `200 OK`, `None` on any other status.
    fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>, FetchError>;
}

/// Blocking `reqwest` client. No retries, default redirect policy.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>, FetchError> {
        let resp = self.client.get(url).send()?;

        let status = resp.status();
        if status != StatusCode::OK {
            tracing::warn!(url, %status, "no data: response status is not 200");
            return Ok(None);
        }

        let buf = resp.bytes()?;
        tracing::debug!(url, bytes = buf.len(), "fetched");
        Ok(Some(buf.to_vec()))
    }
}
