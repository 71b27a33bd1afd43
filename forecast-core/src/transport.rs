use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::TransportError;

/// Thin GET-only wrapper around a shared `reqwest::Client`.
///
/// Cloning is cheap and every clone shares the same connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    http: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Issue a single GET and return the fully buffered body.
    ///
    /// Only `200 OK` counts as success. `url` must not carry secrets;
    /// pass them through `query`, which is kept out of errors and logs.
    pub async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, TransportError> {
        debug!(%url, "GET");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: url.to_owned(),
                source: source.without_url(),
            })?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!(%url, %status, "unexpected status code");
            return Err(TransportError::Status {
                url: url.to_owned(),
                status,
            });
        }

        let body = res.bytes().await.map_err(|source| TransportError::Network {
            url: url.to_owned(),
            source: source.without_url(),
        })?;

        debug!(%url, bytes = body.len(), "response received");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

    #[tokio::test]
    async fn fetch_returns_body_on_200() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .expect(1)
            .mount(&server)
            .await;

        let body = HttpClient::new()
            .fetch(&format!("{}/data", server.uri()), &[])
            .await
            .unwrap();

        assert_eq!(body, b"{\"ok\":true}");
    }

    #[tokio::test]
    async fn fetch_reports_status_on_404() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&server)
            .await;

        let err = HttpClient::new()
            .fetch(&format!("{}/missing", server.uri()), &[("key", "SECRET")])
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(!msg.contains("SECRET"));
    }

    #[tokio::test]
    async fn fetch_treats_other_success_codes_as_errors() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = HttpClient::new().fetch(&server.uri(), &[]).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn fetch_sends_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::query_param("res", "daily"))
            .and(matchers::query_param("key", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let body = HttpClient::new()
            .fetch(&server.uri(), &[("res", "daily"), ("key", "KEY")])
            .await
            .unwrap();

        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn fetch_reports_network_failure() {
        // Nothing listens on port 9 of the loopback interface in the test environment.
        let err = HttpClient::new()
            .fetch("http://127.0.0.1:9/unreachable", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Network { .. }));
        assert_eq!(err.status(), None);
    }
}
