//! Reqwest-backed HTTP transport.

use std::time::Duration;
use worksync_client::{HttpClient, HttpResponse};

/// Request timeout; the engine layers no timeout policy of its own on top.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking reqwest implementation of [`HttpClient`].
pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let inner = reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .build()?;
        Ok(Self { inner })
    }

    fn collect(response: reqwest::blocking::Response) -> Result<HttpResponse, String> {
        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| e.to_string())?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, String> {
        let mut request = self.inner.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request.send().map_err(|e| e.to_string())?;
        Self::collect(response)
    }

    fn put(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, String> {
        let mut request = self.inner.put(url).body(body);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request.send().map_err(|e| e.to_string())?;
        Self::collect(response)
    }
}
