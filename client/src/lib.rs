//! A thin HTTP client for the campus portal API.

pub mod raw;

pub use campus_portal_shared as shared;
pub use raw::{call, ResponseError};

/// Where and how requests are sent.
#[derive(Debug, Clone)]
pub struct Context {
    pub req_client: reqwest::Client,
    /// Origin of the portal, without a trailing slash.
    pub url_prefix: String,
}

impl Context {
    pub fn new(url_prefix: impl Into<String>) -> Self {
        let mut url_prefix = url_prefix.into();
        while url_prefix.ends_with('/') {
            url_prefix.pop();
        }
        Self {
            req_client: reqwest::Client::new(),
            url_prefix,
        }
    }

    /// The full url of an API path.
    #[inline]
    pub fn url(&self, suffix: &str) -> String {
        format!("{}{}", self.url_prefix, suffix)
    }
}
