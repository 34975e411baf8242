//! Alpha Vantage HTTP client.

use std::time::Duration;

use async_trait::async_trait;

use super::response;
use crate::application::ports::{FeedError, QuoteFeedPort};
use crate::domain::quote::Feed;
use crate::infrastructure::config::Credentials;

/// Query function for the intraday endpoint.
const API_FUNCTION: &str = "TIME_SERIES_INTRADAY";

/// Response window requested from the provider.
const API_OUTPUT_SIZE: &str = "compact";

/// Response format requested from the provider.
const API_DATA_TYPE: &str = "json";

/// Sampling granularity of the intraday series.
///
/// Fixed independently of the polling interval; it names the series key in
/// the response body.
pub const SAMPLING_INTERVAL: &str = "5min";

/// Default provider base URL.
const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// Configuration for the Alpha Vantage adapter.
#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    /// API base URL.
    pub base_url: String,
    /// API key credential.
    pub credentials: Credentials,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    /// Create a configuration against the production endpoint.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Quote feed adapter backed by the Alpha Vantage intraday API.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: reqwest::Client,
    config: AlphaVantageConfig,
}

impl AlphaVantageClient {
    /// Create a new client from config.
    pub fn new(config: AlphaVantageConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FeedError::Misconfigured(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build the intraday query URL for `ticker`.
    fn query_url(&self, ticker: &str) -> String {
        format!(
            "{}/query?function={API_FUNCTION}&symbol={ticker}&interval={SAMPLING_INTERVAL}\
             &outputsize={API_OUTPUT_SIZE}&datatype={API_DATA_TYPE}&apikey={}",
            self.config.base_url,
            self.config.credentials.api_key(),
        )
    }
}

#[async_trait]
impl QuoteFeedPort for AlphaVantageClient {
    async fn fetch_feed(&self, ticker: &str) -> Result<Feed, FeedError> {
        let url = self.query_url(ticker);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                code: status.as_u16().to_string(),
                message: body,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FeedError::MalformedResponse(e.to_string()))?;

        response::parse_time_series(&body, SAMPLING_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> AlphaVantageClient {
        let credentials = Credentials::new("test-key").unwrap();
        let config = AlphaVantageConfig::new(credentials).with_base_url(server.uri());
        AlphaVantageClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn fetches_and_parses_a_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("function", "TIME_SERIES_INTRADAY"))
            .and(query_param("symbol", "AAPL"))
            .and(query_param("interval", "5min"))
            .and(query_param("outputsize", "compact"))
            .and(query_param("datatype", "json"))
            .and(query_param("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Time Series (5min)": {
                    "2024-03-05 16:00:00": { "4. close": "105.0000" },
                    "2024-03-04 16:00:00": { "4. close": "99.0000" },
                },
            })))
            .mount(&server)
            .await;

        let feed = client_for(&server).fetch_feed("AAPL").await.unwrap();
        assert_eq!(feed.len(), 2);
        assert!(feed.iter().any(|s| s.close == dec!(105)));
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_feed("AAPL").await;
        assert!(matches!(
            result,
            Err(FeedError::Api { code, .. }) if code == "503"
        ));
    }

    #[tokio::test]
    async fn non_json_body_maps_to_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_feed("AAPL").await;
        assert!(matches!(result, Err(FeedError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn provider_throttle_note_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Note": "API call frequency exceeded.",
            })))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_feed("AAPL").await;
        assert!(matches!(result, Err(FeedError::Api { .. })));
    }
}
