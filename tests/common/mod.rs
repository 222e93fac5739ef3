//! Shared test doubles for grading tests

#![allow(dead_code)]

use async_trait::async_trait;
use essay_grader::grading::{GradeResult, GradingClient, GradingError, GradingResult};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, RwLock};

/// Scripted grading client that records every essay it receives
pub struct MockGradingClient {
    responses: Arc<RwLock<VecDeque<GradeResult<GradingResult>>>>,
    call_history: Arc<RwLock<Vec<String>>>,
    latency: Duration,
    gate: Option<Arc<Notify>>,
}

impl MockGradingClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(VecDeque::new())),
            call_history: Arc::new(RwLock::new(Vec::new())),
            latency: Duration::ZERO,
            gate: None,
        }
    }

    /// Answer every request after `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Hold every request until the gate is notified
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub async fn push_response(&self, response: GradeResult<GradingResult>) {
        self.responses.write().await.push_back(response);
    }

    pub async fn call_count(&self) -> usize {
        self.call_history.read().await.len()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.call_history.read().await.clone()
    }
}

#[async_trait]
impl GradingClient for MockGradingClient {
    async fn grade(&self, essay_text: &str) -> GradeResult<GradingResult> {
        self.call_history.write().await.push(essay_text.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.responses
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(GradingError::network("no scripted response")))
    }

    fn endpoint(&self) -> &str {
        "mock://grade-essay"
    }
}

/// The response used throughout the grading examples
pub fn sample_result() -> GradingResult {
    GradingResult {
        grade: 8.0,
        percentage: 85.0,
        feedback: "Good structure".to_string(),
        grammar_errors: 2,
        vocabulary_diversity: 0.62,
        readability_score: 65.3,
    }
}

pub fn other_result() -> GradingResult {
    GradingResult {
        grade: 4.5,
        percentage: 45.0,
        feedback: "Essay is relatively short, consider adding more content.".to_string(),
        grammar_errors: 7,
        vocabulary_diversity: 0.41,
        readability_score: 38.0,
    }
}
