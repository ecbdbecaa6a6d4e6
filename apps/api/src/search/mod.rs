//! Job Search Client — one POST to a Serper-style search API per run.

use std::str::FromStr;

use anyhow::bail;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod formatter;
pub mod query;

pub use query::{QueryPolicy, SearchQuery};

const API_KEY_HEADER: &str = "X-API-KEY";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How the search credential is attached to the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchAuthScheme {
    /// `X-API-KEY: <key>`
    #[default]
    ApiKeyHeader,
    /// `Authorization: Bearer <key>`
    Bearer,
}

impl FromStr for SearchAuthScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api-key" | "x-api-key" => Ok(SearchAuthScheme::ApiKeyHeader),
            "bearer" => Ok(SearchAuthScheme::Bearer),
            other => bail!("Unknown SEARCH_AUTH_SCHEME '{other}' (expected 'api-key' or 'bearer')"),
        }
    }
}

/// Runs a job search and hands back the provider's raw JSON.
#[async_trait]
pub trait JobSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Value, SearchError>;
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
}

#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: String,
    api_key: String,
    auth_scheme: SearchAuthScheme,
    location: Option<String>,
}

impl SearchClient {
    pub fn new(
        api_key: String,
        endpoint: String,
        auth_scheme: SearchAuthScheme,
        location: Option<String>,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint,
            api_key,
            auth_scheme,
            location,
        })
    }
}

#[async_trait]
impl JobSearch for SearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Value, SearchError> {
        let body = SearchRequest {
            q: &query.text,
            location: self.location.as_deref(),
        };

        let request = self.client.post(&self.endpoint).json(&body);
        let request = match self.auth_scheme {
            SearchAuthScheme::ApiKeyHeader => request.header(API_KEY_HEADER, &self.api_key),
            SearchAuthScheme::Bearer => request.bearer_auth(&self.api_key),
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(bytes = text.len(), "Search API responded");
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn query(text: &str) -> SearchQuery {
        SearchQuery {
            text: text.to_string(),
            truncated: false,
        }
    }

    fn client_for(
        server: &MockServer,
        scheme: SearchAuthScheme,
        location: Option<&str>,
    ) -> SearchClient {
        SearchClient::new(
            "search-key".to_string(),
            format!("{}/search", server.uri()),
            scheme,
            location.map(String::from),
        )
        .unwrap()
    }

    #[test]
    fn test_auth_scheme_parsing() {
        assert_eq!(
            "api-key".parse::<SearchAuthScheme>().unwrap(),
            SearchAuthScheme::ApiKeyHeader
        );
        assert_eq!(
            " Bearer ".parse::<SearchAuthScheme>().unwrap(),
            SearchAuthScheme::Bearer
        );
        assert!("basic".parse::<SearchAuthScheme>().is_err());
        assert_eq!(SearchAuthScheme::default(), SearchAuthScheme::ApiKeyHeader);
    }

    #[tokio::test]
    async fn test_api_key_header_and_query_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("x-api-key", "search-key"))
            .and(body_json(json!({"q": "remote rust engineer"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"organic": []})))
            .expect(1)
            .mount(&server)
            .await;

        let raw = client_for(&server, SearchAuthScheme::ApiKeyHeader, None)
            .search(&query("remote rust engineer"))
            .await
            .unwrap();
        assert_eq!(raw, json!({"organic": []}));
    }

    #[tokio::test]
    async fn test_bearer_scheme() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer search-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server, SearchAuthScheme::Bearer, None)
            .search(&query("go"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_location_is_sent_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"q": "go", "location": "remote"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server, SearchAuthScheme::ApiKeyHeader, Some("remote"))
            .search(&query("go"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_surfaces_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Unauthorized."))
            .mount(&server)
            .await;

        let err = client_for(&server, SearchAuthScheme::ApiKeyHeader, None)
            .search(&query("go"))
            .await
            .unwrap_err();
        match err {
            SearchError::Api { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "Unauthorized.");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server, SearchAuthScheme::ApiKeyHeader, None)
            .search(&query("go"))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let client = SearchClient::new(
            "k".to_string(),
            "http://127.0.0.1:1/search".to_string(),
            SearchAuthScheme::ApiKeyHeader,
            None,
        )
        .unwrap();
        let err = client.search(&query("go")).await.unwrap_err();
        assert!(matches!(err, SearchError::Http(_)));
    }
}
