//! Talking to the essay grading service
//!
//! The service itself (scoring, grammar checks, readability) is remote; this
//! module only knows how to send an essay and decode what comes back.

pub mod client;
pub mod error;
pub mod result;

pub use client::{GradingClient, HttpGradingClient};
pub use error::{GradeResult, GradingError, SUBMISSION_FAILED_MESSAGE};
pub use result::GradingResult;
