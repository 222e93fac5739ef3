//! Submission controller
//!
//! Owns everything the essay form shows: the draft being edited, the last
//! grading result, whether a request is in flight and the error from the last
//! attempt. At most one grading request is outstanding at any time; a submit
//! issued while another is pending is dropped, not queued.

use crate::grading::{GradingClient, GradingResult};
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex, MutexGuard};

/// Where the controller is in its request cycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Exactly one grading request is outstanding
    Pending,
    /// The last request completed
    Settled(Outcome),
}

/// How the last request completed
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Graded(GradingResult),
    Failed(String),
}

/// Read-only copy of the controller state, used for rendering
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControllerSnapshot {
    pub draft: String,
    pub result: Option<GradingResult>,
    pub pending: bool,
    pub error: Option<String>,
    pub state: SubmissionState,
    pub settled_at: Option<DateTime<Local>>,
}

impl ControllerSnapshot {
    pub fn can_submit(&self) -> bool {
        !self.pending && has_content(&self.draft)
    }
}

#[derive(Debug, Default)]
struct ControllerState {
    draft: String,
    result: Option<GradingResult>,
    state: SubmissionState,
    settled_at: Option<DateTime<Local>>,
}

impl ControllerState {
    fn is_pending(&self) -> bool {
        matches!(self.state, SubmissionState::Pending)
    }

    fn can_submit(&self) -> bool {
        !self.is_pending() && has_content(&self.draft)
    }

    fn error(&self) -> Option<String> {
        match &self.state {
            SubmissionState::Settled(Outcome::Failed(message)) => Some(message.clone()),
            _ => None,
        }
    }
}

fn has_content(draft: &str) -> bool {
    !draft.trim().is_empty()
}

/// Mediates one essay grading request at a time
pub struct SubmissionController {
    client: Arc<dyn GradingClient>,
    state: Mutex<ControllerState>,
}

impl SubmissionController {
    /// Create a controller with an empty draft
    pub fn new(client: Arc<dyn GradingClient>) -> Self {
        Self {
            client,
            state: Mutex::new(ControllerState::default()),
        }
    }

    // The lock is never held across an await, so a poisoned guard still
    // holds consistent state.
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the draft text verbatim
    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock().draft = text.into();
    }

    /// Edit the draft in place
    pub fn edit_draft<F>(&self, edit: F)
    where
        F: FnOnce(&mut String),
    {
        edit(&mut self.lock().draft);
    }

    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    /// True when the draft has non-whitespace content and nothing is pending
    pub fn can_submit(&self) -> bool {
        self.lock().can_submit()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_pending()
    }

    /// Last successful result, kept across later failures
    pub fn result(&self) -> Option<GradingResult> {
        self.lock().result.clone()
    }

    /// Error from the last attempt, if it failed
    pub fn error(&self) -> Option<String> {
        self.lock().error()
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        let state = self.lock();
        ControllerSnapshot {
            draft: state.draft.clone(),
            result: state.result.clone(),
            pending: state.is_pending(),
            error: state.error(),
            state: state.state.clone(),
            settled_at: state.settled_at,
        }
    }

    /// Submit the current draft for grading.
    ///
    /// Does nothing unless [`can_submit`](Self::can_submit) holds. Failures
    /// never reach the caller; they become the error state.
    pub async fn submit(&self) {
        let essay_text = {
            let mut state = self.lock();
            if !state.can_submit() {
                tracing::debug!(
                    "Ignoring submit: pending={} blank_draft={}",
                    state.is_pending(),
                    !has_content(&state.draft)
                );
                return;
            }
            state.state = SubmissionState::Pending;
            state.draft.clone()
        };

        tracing::info!("Submitting essay to {}", self.client.endpoint());
        let response = self.client.grade(&essay_text).await;

        let mut state = self.lock();
        match response {
            Ok(result) => {
                tracing::info!(
                    "Essay graded: {} ({})",
                    result.grade_label(),
                    result.percentage_label()
                );
                state.result = Some(result.clone());
                state.state = SubmissionState::Settled(Outcome::Graded(result));
            }
            Err(e) => {
                tracing::warn!("Error grading essay ({}): {}", e.kind(), e);
                state.state =
                    SubmissionState::Settled(Outcome::Failed(e.user_message().to_string()));
            }
        }
        state.settled_at = Some(Local::now());
    }
}
