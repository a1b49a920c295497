//! # Transport layer
//!
//! The wire collaborator every capability module talks through. The trait
//! exposes the four HTTP verbs against service-relative paths and returns an
//! opaque `{status, body}` pair; classifying that pair is the dispatcher's
//! job. Transport-level faults (refused connection, timeout, bad certificate)
//! are classified *here* so they enter the taxonomy instead of propagating as
//! opaque reqwest errors.

use crate::config::ServerConfig;
use async_trait::async_trait;
use nexus_error::{Error, Result};
use std::time::Duration;

/// Default header values shared by every request
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const DEFAULT_ACCEPT: &str = "application/json";

/// The raw outcome of one HTTP exchange, fed to the dispatcher untouched.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The abstract wire the client issues requests through.
///
/// Paths are service-relative (e.g. `service/local/roles`); base-url
/// resolution belongs to the implementation. Implementations must be safe to
/// share across concurrent callers.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<HttpResponse>;
    async fn post(&self, path: &str, body: Option<String>) -> Result<HttpResponse>;
    async fn put(&self, path: &str, body: Option<String>) -> Result<HttpResponse>;
    async fn delete(&self, path: &str) -> Result<HttpResponse>;
}

// ============================================================================
// Reqwest implementation
// ============================================================================

/// HTTP transport backed by a shared reqwest client.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl ReqwestTransport {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static(DEFAULT_CONTENT_TYPE),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(DEFAULT_ACCEPT),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()
            .map_err(|e| {
                Error::invalid_settings("could not build the HTTP client")
                    .with_operation("transport::new")
                    .set_source(e)
            })?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        let url = self.url_for(path);
        tracing::debug!(%method, %url, "sending request");

        let mut req = self.http.request(method, &url);
        if let Some(username) = &self.username {
            req = req.basic_auth(username, self.password.as_deref());
        }
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(classify_send_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::connection_failed().set_source(e))?;

        tracing::debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse> {
        self.send(reqwest::Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Option<String>) -> Result<HttpResponse> {
        self.send(reqwest::Method::POST, path, body).await
    }

    async fn put(&self, path: &str, body: Option<String>) -> Result<HttpResponse> {
        self.send(reqwest::Method::PUT, path, body).await
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse> {
        self.send(reqwest::Method::DELETE, path, None).await
    }
}

/// Map a reqwest send failure onto the taxonomy.
///
/// Certificate rejections surface as connect errors whose source chain
/// mentions the certificate, so the chain text is the only signal available.
fn classify_send_error(err: reqwest::Error) -> Error {
    let classified = if chain_mentions(&err, &["certificate", "UnknownIssuer"]) {
        Error::untrusted_certificate()
    } else if chain_mentions(&err, &["ssl", "tls", "handshake"]) {
        Error::non_secure_connection()
    } else {
        Error::connection_failed()
    };
    classified.with_operation("transport::send").set_source(err)
}

fn chain_mentions(err: &reqwest::Error, needles: &[&str]) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(inner) = source {
        let text = inner.to_string();
        if needles.iter().any(|n| text.contains(n)) {
            return true;
        }
        source = inner.source();
    }
    false
}

// ============================================================================
// Test stub
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_resolution() {
        let config = ServerConfig::new("https://nexus.example.com/");
        let transport = ReqwestTransport::new(&config).unwrap();
        assert_eq!(
            transport.url_for("service/local/roles"),
            "https://nexus.example.com/service/local/roles"
        );
        assert_eq!(
            transport.url_for("/service/local/roles"),
            "https://nexus.example.com/service/local/roles"
        );
    }

    #[tokio::test]
    async fn test_stub_replays_in_order_and_records() {
        use stub::StubTransport;

        let transport = StubTransport::new()
            .respond(200, "first")
            .respond(404, "second");

        let first = transport.get("service/local/roles").await.unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(first.body, "first");

        let second = transport.delete("service/local/roles/dev").await.unwrap();
        assert_eq!(second.status, 404);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[1].path, "service/local/roles/dev");
    }
}
