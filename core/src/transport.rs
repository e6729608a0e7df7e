//! The network round-trip behind the executor.
//!
//! # Design
//! `Transport` is the only place that performs I/O. The executor builds an
//! `HttpRequest`, awaits one `HttpResponse`, and classifies it. Swapping the
//! transport lets tests script responses without a socket, while
//! `HttpTransport` does the real work through `reqwest`.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue, USER_AGENT};

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Any status code the server sends back, 4xx and 5xx included, is a
/// successful round-trip. `Err` means no response was received.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// `reqwest`-backed transport. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let mut headers = reqwest::header::HeaderMap::new();
        let agent = HeaderValue::from_str(user_agent)
            .map_err(|e| TransportError::new(format!("invalid user agent: {e}")))?;
        headers.insert(USER_AGENT, agent);

        let client = builder.default_headers(headers).build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method.to_reqwest(), request.url);
        for (name, value) in &request.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| TransportError::new(format!("invalid header name: {e}")))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| TransportError::new(format!("invalid header value: {e}")))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
