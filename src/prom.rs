use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Label set of one matched time series, keyed by label name.
pub type Labels = HashMap<String, String>;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

const QUERY_PATH: &str = "/api/v1/query";

#[derive(Debug, Error)]
pub enum PromError {
    #[error("invalid Prometheus server URL {0:?}")]
    BadUrl(String),
    #[error("query timed out after {0:?}")]
    Timeout(Duration),
    #[error("query request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Prometheus returned {error_type:?} error: {message}")]
    Api { error_type: String, message: String },
    #[error("could not decode query response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("query response carried no data section")]
    MissingData,
    #[error("unexpected {0:?} result, expected an instant vector")]
    NotAVector(String),
}

/// Builds the instant vector selector covering every metric the inventory
/// consumes, scoped to one namespace.
pub fn inventory_query(namespace: &str) -> String {
    format!(
        r#"{{namespace="{namespace}", __name__=~'kube_pod_container_info|kube_(deployment|daemonset|statefulset)_labels'}}"#
    )
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    data: Option<QueryData>,
    #[serde(default)]
    warnings: Vec<String>,
    #[serde(default, rename = "errorType")]
    error_type: String,
    #[serde(default)]
    error: String,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    #[serde(rename = "resultType")]
    result_type: String,
    #[serde(default)]
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct VectorSample {
    metric: Labels,
}

/// Client for the Prometheus HTTP query API.
pub struct PromClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl PromClient {
    pub fn new(url: &str) -> Result<Self, PromError> {
        reqwest::Url::parse(url).map_err(|_| PromError::BadUrl(url.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        })
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self
    }

    /// Runs an instant vector query at the current time and returns the label
    /// set of every matched series, in response order.
    pub async fn query(&self, query: &str) -> Result<Vec<Labels>, PromError> {
        let url = format!("{}{}", self.base_url, QUERY_PATH);
        let now = Utc::now().timestamp().to_string();
        let resp = self
            .http
            .get(&url)
            .query(&[("query", query), ("time", now.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.wrap_timeout(e))?;
        let body: ApiResponse = resp.json().await.map_err(|e| self.wrap_timeout(e))?;

        if body.status != "success" {
            return Err(PromError::Api {
                error_type: body.error_type,
                message: body.error,
            });
        }
        if !body.warnings.is_empty() {
            warn!("Prometheus query warnings: {:?}", body.warnings);
        }

        let data = body.data.ok_or(PromError::MissingData)?;
        if data.result_type != "vector" {
            return Err(PromError::NotAVector(data.result_type));
        }
        let samples: Vec<VectorSample> = serde_json::from_value(data.result)?;
        debug!("{} metrics received", samples.len());
        Ok(samples.into_iter().map(|s| s.metric).collect())
    }

    fn wrap_timeout(&self, err: reqwest::Error) -> PromError {
        if err.is_timeout() {
            PromError::Timeout(self.timeout)
        } else {
            PromError::Request(err)
        }
    }
}
