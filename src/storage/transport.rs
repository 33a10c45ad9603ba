// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Raw HTTP seam used for media downloads and uploads.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method};
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use tracing::debug;

use super::config::DriveConfig;
use super::error::{DriveError, DriveResult};

/// A fully built request, ready to hand to an [`HttpTransport`].
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Keeps bearer tokens out of logs.
impl Debug for HttpRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_len", &self.body.as_ref().map(|b| b.len()))
            .finish()
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends raw HTTP requests.
///
/// Only failures to complete the exchange are `Err`; any status code the
/// server answers with comes back as an [`HttpResponse`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> DriveResult<HttpResponse>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a transport whose client honours the timeout and pool options in `config`.
    pub fn from_config(config: &DriveConfig) -> DriveResult<Self> {
        Ok(Self::new(build_client(config)?))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Debug for ReqwestTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReqwestTransport")
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> DriveResult<HttpResponse> {
        debug!("Sending method={} url={}", request.method, request.url);

        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!("Received status={} body_len={}", status, body.len());
        Ok(HttpResponse { status, body })
    }
}

/// Build a reqwest client from the connection options in `config`.
///
/// Unparsable values are ignored, leaving reqwest's defaults in place.
pub fn build_client(config: &DriveConfig) -> DriveResult<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = duration_option(config, "timeout") {
        builder = builder.timeout(secs);
    }
    if let Some(secs) = duration_option(config, "connect_timeout") {
        builder = builder.connect_timeout(secs);
    }
    if let Some(secs) = duration_option(config, "pool_idle_timeout") {
        builder = builder.pool_idle_timeout(secs);
    }
    if let Some(max_idle) = config
        .get_option("pool_max_idle_per_host")
        .and_then(|s| s.parse::<usize>().ok())
    {
        builder = builder.pool_max_idle_per_host(max_idle);
    }
    builder
        .build()
        .map_err(|e| DriveError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// Seconds-valued option. "0" and "disabled" mean no limit.
fn duration_option(config: &DriveConfig, key: &str) -> Option<Duration> {
    let value = config.get_option(key)?;
    if value == "0" || value == "disabled" {
        return None;
    }
    value.parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = HttpRequest::new(Method::GET, "http://x").with_header("Content-Type", "a/b");
        assert_eq!(request.header("content-type"), Some("a/b"));
        assert_eq!(request.header("authorization"), None);
    }

    #[test]
    fn test_debug_redacts_authorization() {
        let request = HttpRequest::new(Method::GET, "http://x")
            .with_header("Authorization", "Bearer secret-token");
        let debug_str = format!("{:?}", request);
        assert!(debug_str.contains("<redacted>"));
        assert!(!debug_str.contains("secret-token"));
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }

    #[test]
    fn test_duration_option() {
        let config = DriveConfig::new()
            .with_option("timeout", "disabled")
            .with_option("connect_timeout", "10")
            .with_option("pool_idle_timeout", "soon");

        assert_eq!(duration_option(&config, "timeout"), None);
        assert_eq!(
            duration_option(&config, "connect_timeout"),
            Some(Duration::from_secs(10))
        );
        assert_eq!(duration_option(&config, "pool_idle_timeout"), None);
        assert_eq!(duration_option(&config, "missing"), None);
    }

    #[test]
    fn test_build_client_with_defaults() {
        assert!(build_client(&DriveConfig::new()).is_ok());
    }

    #[tokio::test]
    async fn test_reqwest_transport_returns_error_status_as_response() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            let body = r#"{"error":{"message":"not found"}}"#;
            let response = format!(
                "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&received).to_string()
        });

        let transport = ReqwestTransport::from_config(&DriveConfig::new()).unwrap();
        let request = HttpRequest::new(Method::GET, format!("http://{}/files/f1?alt=media", addr))
            .with_header("Authorization", "Bearer t0k");
        let response = transport.send(request).await.unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(&response.body[..], br#"{"error":{"message":"not found"}}"#);

        let raw_request = server.await.unwrap().to_lowercase();
        assert!(raw_request.starts_with("get /files/f1?alt=media"));
        assert!(raw_request.contains("authorization: bearer t0k"));
    }
}
