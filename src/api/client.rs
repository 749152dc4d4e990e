use std::time::Instant;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::{
    api::ApiError,
    config::{CONNECT_TIMEOUT, REQUEST_TIMEOUT},
};

/// Path probed by [`ApiClient::test_connection`].
pub const HEALTH_PATH: &str = "/api/health";

/// Undecoded HTTP response as returned by a [`Transport`].
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

/// Issues GET requests for the API client.
///
/// Implementations only report transport failures as errors. Non-2xx
/// responses are returned as a regular [`RawResponse`] and classified by the
/// client.
pub trait Transport {
    fn get(&self, url: &str) -> Result<RawResponse, ApiError>;
}

/// Blocking reqwest transport with fixed connect and request timeouts.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::network("failed to build HTTP client", e))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<RawResponse, ApiError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| ApiError::network(describe_transport_error(&e), e))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .text()
            .map_err(|e| ApiError::network("failed to read response body", e))?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "could not connect to server".to_string()
    } else {
        err.to_string()
    }
}

/// Decoded payload together with the status and headers it arrived with.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    pub headers: HeaderMap,
}

impl<T> ApiResponse<T> {
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

/// Thin JSON client bound to one API base URL.
///
/// Every call is a single synchronous GET; nothing is retried.
pub struct ApiClient {
    base_url: String,
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::with_transport(base_url, HttpTransport::new()?))
    }

    pub fn with_transport(base_url: &str, transport: impl Transport + 'static) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport: Box::new(transport),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetches `path` and decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] when the request could not be completed
    /// - [`ApiError::Http`] for any status outside `200..300`
    /// - [`ApiError::Decode`] when the body is empty or not valid JSON for `T`
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        let url = self.url_for(path);
        let started = Instant::now();
        let raw = self.transport.get(&url)?;
        tracing::debug!(
            url = %url,
            status = raw.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "GET"
        );

        if !(200..300).contains(&raw.status) {
            tracing::warn!(url = %url, status = raw.status, "request failed");
            return Err(ApiError::Http {
                status: raw.status,
                body: raw.body,
            });
        }

        if raw.body.trim().is_empty() {
            return Err(ApiError::decode(format!("empty body from {}", url), None));
        }

        let data = serde_json::from_str::<T>(&raw.body)
            .map_err(|e| ApiError::decode(format!("unexpected JSON from {}", url), Some(e)))?;

        Ok(ApiResponse {
            data,
            status: raw.status,
            headers: raw.headers,
        })
    }

    /// Probes the health endpoint; any failure counts as unreachable.
    pub fn test_connection(&self) -> bool {
        let url = self.url_for(HEALTH_PATH);
        match self.transport.get(&url) {
            Ok(raw) => (200..300).contains(&raw.status),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> ApiResponse<()> {
        ApiResponse {
            data: (),
            status,
            headers: HeaderMap::new(),
        }
    }

    #[test]
    fn success_range_boundaries() {
        assert!(!response(199).is_successful());
        assert!(response(200).is_successful());
        assert!(response(299).is_successful());
        assert!(!response(300).is_successful());
    }

    struct Unused;

    impl Transport for Unused {
        fn get(&self, _url: &str) -> Result<RawResponse, ApiError> {
            unreachable!("no request expected")
        }
    }

    #[test]
    fn joins_paths_without_duplicate_slashes() {
        let client = ApiClient::with_transport("http://localhost:8080/", Unused);
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.url_for("/api/tickets"),
            "http://localhost:8080/api/tickets"
        );
        assert_eq!(
            client.url_for("api/tickets"),
            "http://localhost:8080/api/tickets"
        );
    }
}
