//! KPI API Client
//!
//! A JSON client for the metric catalog, segment catalog and snapshot endpoints.

use crate::api::DataSource;
use crate::api::error::ApiError;
use crate::consts::cli_consts::http;
use crate::environment::Environment;
use crate::model::{Envelope, Metric, SegmentGroup, SnapshotPoint, SnapshotRequest, SnapshotSeries};
use log::debug;
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP", "Build timestamp not available");

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("kpi-dash/", env!("CARGO_PKG_VERSION"));

const METRICS_ENDPOINT: &str = "api/metrics";
const SEGMENTS_ENDPOINT: &str = "api/segments";
const SNAPSHOT_ENDPOINT: &str = "api/snapshot";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    pub fn new(environment: Environment, request_timeout: Duration) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.data)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .send()
            .await?;
        Self::decode_response(response).await
    }

    async fn post_request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .json(body)
            .send()
            .await?;
        Self::decode_response(response).await
    }
}

#[async_trait::async_trait]
impl DataSource for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn metric_catalog(&self) -> Result<Vec<Metric>, ApiError> {
        self.get_request(METRICS_ENDPOINT).await
    }

    async fn segment_catalog(&self) -> Result<Vec<SegmentGroup>, ApiError> {
        self.get_request(SEGMENTS_ENDPOINT).await
    }

    async fn snapshot(&self, request: &SnapshotRequest) -> Result<Vec<SnapshotPoint>, ApiError> {
        let series: SnapshotSeries = self.post_request(SNAPSHOT_ENDPOINT, request).await?;
        Ok(series.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(environment: Environment) -> ApiClient {
        ApiClient::new(environment, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn build_url_joins_base_and_endpoint() {
        let client = client(Environment::Custom {
            api_url: "http://localhost:8080/".to_string(),
        });
        assert_eq!(
            client.build_url("/api/metrics"),
            "http://localhost:8080/api/metrics"
        );
        assert_eq!(
            client.build_url(SNAPSHOT_ENDPOINT),
            "http://localhost:8080/api/snapshot"
        );
    }

    #[tokio::test]
    async fn unreachable_host_reports_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = client(Environment::Custom {
            api_url: "http://127.0.0.1:9".to_string(),
        });
        let result = client.metric_catalog().await;
        assert!(matches!(result, Err(ApiError::Reqwest(_))));
    }
}
