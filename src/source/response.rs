//! HTTP response source.
//!
//! Zellij performs the request on the plugin's behalf and hands back the
//! status and body in a `WebRequestResult` event. Wrapping that result in a
//! [`FetchedResponse`] lets the store load it through the same [`DataSource`]
//! path as a local file.

use crate::domain::error::{CatalogError, Result};
use crate::source::backend::DataSource;

/// A completed HTTP response awaiting decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    /// Requested URL, used in log messages.
    url: String,
    /// HTTP status code reported by Zellij.
    status: u16,
    /// Raw response body. Taken by the first successful `fetch`.
    body: Vec<u8>,
}

impl FetchedResponse {
    /// Wraps the parts of a `WebRequestResult`.
    ///
    /// # Parameters
    ///
    /// * `url` - URL the request was made to
    /// * `status` - HTTP status code
    /// * `body` - Response body bytes
    pub fn new(url: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            status,
            body,
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl DataSource for FetchedResponse {
    fn describe(&self) -> String {
        self.url.clone()
    }

    /// Hands over the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Load`] with the status and body text for any
    /// other status.
    fn fetch(&mut self) -> Result<Vec<u8>> {
        if !self.is_success() {
            let detail = String::from_utf8_lossy(&self.body);
            return Err(CatalogError::Load(format!(
                "HTTP error! status: {} ({})",
                self.status,
                detail.trim()
            )));
        }
        Ok(std::mem::take(&mut self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_yields_body() {
        let mut response = FetchedResponse::new("https://x/db.json", 200, b"[]".to_vec());
        assert_eq!(response.fetch().unwrap(), b"[]");
    }

    #[test]
    fn non_success_status_is_a_load_error() {
        let mut response = FetchedResponse::new("https://x/db.json", 404, b"Not Found".to_vec());
        let err = response.fetch().unwrap_err();
        assert!(matches!(err, CatalogError::Load(_)));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn redirect_status_is_not_success() {
        assert!(!FetchedResponse::new("u", 301, vec![]).is_success());
        assert!(FetchedResponse::new("u", 204, vec![]).is_success());
    }
}
