// File: src/client/core.rs
use crate::model::{Article, ArticlePayload, PublishOutcome};

use http::{Method, Request, StatusCode, Uri, header};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

/// Production endpoint of the articles API.
pub const DEFAULT_API_BASE: &str = "https://dev.to/api";

/// Sentinel tag: listing with it omits the filter query entirely, so the
/// server's default ordering applies.
pub const TOP_TAG: &str = "Top";

type HttpsClient = Client<
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
    String,
>;

/// Thin client for the two REST calls this crate makes: list articles by
/// tag and create an article. No retry, no backoff, no pagination.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: HttpsClient,
    base: Uri,
}

impl ApiClient {
    /// Builds a client against `base_url` (tests point this at a mock
    /// server; production uses `DEFAULT_API_BASE`).
    pub fn new(base_url: &str) -> Result<Self, String> {
        let base: Uri = base_url
            .parse()
            .map_err(|e: http::uri::InvalidUri| e.to_string())?;

        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() {
            // Plain-http endpoints still work; only https would fail later.
            log::warn!("No valid system certificates found");
        }
        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http = Client::builder(TokioExecutor::new()).build(https_connector);
        Ok(Self { http, base })
    }

    pub fn default_client() -> Result<Self, String> {
        Self::new(DEFAULT_API_BASE)
    }

    /// Path and query for a tag listing. The `Top` sentinel omits the
    /// filter parameter.
    pub fn articles_path(tag: &str) -> String {
        if tag == TOP_TAG {
            "/articles".to_string()
        } else {
            format!("/articles?tag={}", urlencoding::encode(tag))
        }
    }

    fn endpoint(&self, path_and_query: &str) -> Result<Uri, String> {
        let base = self.base.to_string();
        format!("{}{}", base.trim_end_matches('/'), path_and_query)
            .parse()
            .map_err(|e: http::uri::InvalidUri| e.to_string())
    }

    async fn send(&self, req: Request<String>) -> Result<(StatusCode, Vec<u8>), String> {
        let response = self.http.request(req).await.map_err(|e| e.to_string())?;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| e.to_string())?
            .to_bytes();
        Ok((status, body.to_vec()))
    }

    /// `GET /articles?tag=<label>`: one page, fetched fresh on every call.
    pub async fn get_articles(&self, tag: &str) -> Result<Vec<Article>, String> {
        let uri = self.endpoint(&Self::articles_path(tag))?;
        log::debug!("GET {}", uri);
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(String::new())
            .map_err(|e| e.to_string())?;

        let (status, body) = self.send(req).await?;
        if !status.is_success() {
            return Err(format!("Article listing failed: HTTP {}", status));
        }
        serde_json::from_slice(&body).map_err(|e| e.to_string())
    }

    /// `POST /articles` with the credential in the `api-key` header.
    /// The decoded response is discriminated into `PublishOutcome`;
    /// transport and decode failures are `Err`.
    pub async fn post_article(
        &self,
        payload: &ArticlePayload,
        api_key: &str,
    ) -> Result<PublishOutcome, String> {
        let uri = self.endpoint("/articles")?;
        log::debug!("POST {}", uri);
        let body = serde_json::to_string(payload).map_err(|e| e.to_string())?;
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header("api-key", api_key)
            .body(body)
            .map_err(|e| e.to_string())?;

        let (status, bytes) = self.send(req).await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| format!("Malformed publish response: {}", e))?;
        Ok(PublishOutcome::from_response(&value, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_articles_path_filters_by_tag() {
        assert_eq!(ApiClient::articles_path("rust"), "/articles?tag=rust");
    }

    #[test]
    fn test_articles_path_top_sentinel_omits_query() {
        assert_eq!(ApiClient::articles_path(TOP_TAG), "/articles");
    }

    #[test]
    fn test_articles_path_encodes_awkward_labels() {
        assert_eq!(
            ApiClient::articles_path("c & d"),
            "/articles?tag=c%20%26%20d"
        );
        // The encoded form must survive Uri parsing.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        assert!(client.endpoint(&ApiClient::articles_path("c & d")).is_ok());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = ApiClient::new("http://127.0.0.1:9/api/").unwrap();
        let uri = client.endpoint("/articles").unwrap();
        assert_eq!(uri.to_string(), "http://127.0.0.1:9/api/articles");
    }
}
