use std::future::Future;

use reqwest::{header::HeaderMap, Client, StatusCode, Url, Version};

use crate::{errors::TransportError, target::Target};

/// The request capability the dispatcher races: one request against one target.
///
/// Implementations must be idempotent from the caller's point of view; the same
/// request is issued to every target in a round. Whatever resources a request
/// holds must be released when the returned future completes or is dropped,
/// since losing attempts are abandoned mid-flight.
pub trait Transport: Send + Sync + 'static {
    type Response: Send + 'static;

    fn send(
        &self,
        target: &Target,
    ) -> impl Future<Output = Result<Self::Response, TransportError>> + Send;
}

/// A fully received HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub version: Version,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Issues `GET` requests with a shared `reqwest` client.
///
/// The body is read inside [`Transport::send`], so an attempt cancelled while
/// the body is still streaming drops the connection instead of leaking it.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client (proxies, TLS, pool limits).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    type Response = HttpResponse;

    async fn send(&self, target: &Target) -> Result<HttpResponse, TransportError> {
        let url = Url::parse(target.as_str())
            .map_err(|_| TransportError::InvalidTarget(target.to_string()))?;

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let version = resp.version();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            version,
            headers,
            body,
        })
    }
}
