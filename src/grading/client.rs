//! Transport to the remote grading service

use crate::config::GraderConfig;
use crate::grading::error::{GradeResult, GradingError};
use crate::grading::result::{GradeRequest, GradingResult, ServiceErrorBody};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

/// Anything that can turn essay text into a [`GradingResult`]
#[async_trait]
pub trait GradingClient: Send + Sync {
    /// Submit one essay and wait for its grade
    async fn grade(&self, essay_text: &str) -> GradeResult<GradingResult>;

    /// Where requests go, for diagnostics
    fn endpoint(&self) -> &str;
}

/// Grading client that POSTs JSON to the grading service
pub struct HttpGradingClient {
    client: Client,
    url: Url,
    request_timeout: Duration,
}

impl HttpGradingClient {
    /// Create a client for the given grading URL
    pub fn new(url: Url, request_timeout: Duration) -> GradeResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| GradingError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url,
            request_timeout,
        })
    }

    /// Create a client from configuration
    pub fn from_config(config: &GraderConfig) -> GradeResult<Self> {
        let url = config
            .grading_url()
            .map_err(|e| GradingError::config_error(e.to_string()))?;

        Self::new(url, config.request_timeout())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Pull a human readable reason out of an error response body
    fn describe_error_body(body: &str) -> String {
        match serde_json::from_str::<ServiceErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) if body.trim().is_empty() => "empty response body".to_string(),
            Err(_) => body.chars().take(200).collect(),
        }
    }
}

#[async_trait]
impl GradingClient for HttpGradingClient {
    async fn grade(&self, essay_text: &str) -> GradeResult<GradingResult> {
        let request = GradeRequest { essay_text };

        tracing::debug!(
            "Posting essay ({} chars) to {}",
            essay_text.chars().count(),
            self.url
        );

        let response = timeout(
            self.request_timeout,
            self.client.post(self.url.clone()).json(&request).send(),
        )
        .await
        .map_err(|_| GradingError::timeout(self.request_timeout))?
        .map_err(|e| match GradingError::from(e) {
            GradingError::Timeout { .. } => GradingError::timeout(self.request_timeout),
            other => other,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(GradingError::from)?;

        if !status.is_success() {
            return Err(GradingError::status(
                status.as_u16(),
                Self::describe_error_body(&body),
            ));
        }

        let result: GradingResult = serde_json::from_str(&body)?;
        tracing::debug!(
            "Grading service answered grade={} percentage={}",
            result.grade,
            result.percentage
        );

        Ok(result)
    }

    fn endpoint(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_default_config() {
        let client = HttpGradingClient::from_config(&GraderConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/grade-essay");
        assert_eq!(client.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_describe_error_body() {
        assert_eq!(
            HttpGradingClient::describe_error_body(r#"{"error": "No valid essay text provided"}"#),
            "No valid essay text provided"
        );
        assert_eq!(
            HttpGradingClient::describe_error_body("  "),
            "empty response body"
        );
        assert_eq!(
            HttpGradingClient::describe_error_body("Bad Gateway"),
            "Bad Gateway"
        );
    }
}
