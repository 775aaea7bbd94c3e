use common::models::ErrorBody;
use reqwest::header::CONTENT_TYPE;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A backend call, addressed by path relative to the backend base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn post_json<B: Serialize>(
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, TransportError> {
        let mut request = Self::new(Method::Post, path);
        request.body = Some(serde_json::to_string(body)?);
        Ok(request)
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw backend response. Callers inspect the status themselves; only the
/// session gate reacts to 401.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
            .to_string();
        Self {
            status,
            status_text,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    /// The `error` field of a JSON error body, when there is a non-empty one.
    pub fn error_message(&self) -> Option<String> {
        self.json::<ErrorBody>()
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{method} {path} failed: {source}")]
    Http {
        method: &'static str,
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Performs backend calls. Implementations run on the console's single
/// thread, so the returned futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, backend_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            client,
            base: Url::parse(backend_url)?,
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.base.join(&request.path)?;
        let ApiRequest {
            method,
            path,
            headers,
            body,
        } = request;

        let mut builder = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let http_err = |source| TransportError::Http {
            method: method.as_str(),
            path: path.clone(),
            source,
        };
        let resp = builder.send().await.map_err(http_err)?;
        let status = resp.status();
        let body = resp.text().await.map_err(http_err)?;

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn error_message_reads_json_error_field() {
        let resp = ApiResponse::new(500, r#"{"error":"failed to list api keys"}"#);
        assert_eq!(resp.error_message().as_deref(), Some("failed to list api keys"));
        assert_eq!(resp.status_text, "Internal Server Error");
        assert!(!resp.is_ok());
    }

    #[test]
    fn error_message_ignores_non_json_and_empty() {
        assert_eq!(ApiResponse::new(502, "<html>bad gateway</html>").error_message(), None);
        assert_eq!(ApiResponse::new(400, r#"{"error":""}"#).error_message(), None);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = ApiRequest::get("/api/models").header("Authorization", "Bearer abc");
        assert_eq!(req.header_value("authorization"), Some("Bearer abc"));
        assert_eq!(req.header_value("x-other"), None);
    }

    #[tokio::test]
    async fn http_transport_sends_headers_and_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/api-keys"))
            .and(header("authorization", "Bearer abc"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"name": "ci"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"api_key": "sk-1"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(reqwest::Client::new(), &server.uri()).unwrap();
        let request = ApiRequest::post_json("/api/api-keys", &serde_json::json!({"name": "ci"}))
            .unwrap()
            .header("Authorization", "Bearer abc");
        let resp = transport.send(request).await.unwrap();

        assert_eq!(resp.status, 201);
        assert!(resp.is_ok());
        assert_eq!(resp.body, r#"{"api_key":"sk-1"}"#);
    }

    #[tokio::test]
    async fn http_transport_returns_non_ok_responses() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/models/m1"))
            .respond_with(ResponseTemplate::new(401).set_body_json(
                serde_json::json!({"error": "Invalid or expired token"}),
            ))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(reqwest::Client::new(), &server.uri()).unwrap();
        let resp = transport
            .send(ApiRequest::delete("/api/models/m1"))
            .await
            .unwrap();
        assert!(resp.is_unauthorized());
        assert_eq!(resp.error_message().as_deref(), Some("Invalid or expired token"));
    }

    #[tokio::test]
    async fn http_transport_reports_connection_failure() {
        let transport =
            HttpTransport::new(reqwest::Client::new(), "http://127.0.0.1:9").unwrap();
        let err = transport
            .send(ApiRequest::get("/api/providers"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Http { method: "GET", .. }));
    }

    #[test]
    fn rejects_invalid_backend_url() {
        assert!(matches!(
            HttpTransport::new(reqwest::Client::new(), "not a url"),
            Err(TransportError::Url(_))
        ));
    }
}
