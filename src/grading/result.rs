//! The grading service's answer for one essay

use serde::{Deserialize, Serialize};

/// Scores and feedback returned by the grading service.
///
/// Values are stored exactly as received. The service documents `grade` as
/// 0-10, `percentage` as 0-100 and `vocabulary_diversity` as 0.0-1.0, but
/// nothing here enforces those ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingResult {
    pub grade: f64,
    pub percentage: f64,
    pub feedback: String,
    pub grammar_errors: u32,
    pub vocabulary_diversity: f64,
    pub readability_score: f64,
}

/// Request body for the grading endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GradeRequest<'a> {
    pub essay_text: &'a str,
}

/// Error body the grading service sends with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

impl GradingResult {
    /// Grade as shown on the grade gauge, e.g. `8/10` or `7.5/10`
    pub fn grade_label(&self) -> String {
        format!("{}/10", self.grade)
    }

    /// Grade as a gauge ratio
    pub fn grade_ratio(&self) -> f64 {
        clamp_ratio(self.grade / 10.0)
    }

    /// Percentage rounded to a whole number, e.g. `85%`.
    ///
    /// Halves round up, so `-2.5` shows as `-2%`, and negative zero shows as `0%`.
    pub fn percentage_label(&self) -> String {
        let rounded = (self.percentage + 0.5).floor() + 0.0;
        format!("{}%", rounded)
    }

    /// Percentage as a gauge ratio
    pub fn percentage_ratio(&self) -> f64 {
        clamp_ratio(self.percentage / 100.0)
    }

    pub fn grammar_label(&self) -> String {
        format!("{} errors found", self.grammar_errors)
    }

    pub fn vocabulary_label(&self) -> String {
        format!("{:.1}% unique words", self.vocabulary_diversity * 100.0)
    }

    pub fn readability_label(&self) -> String {
        format!("{:.1}", self.readability_score)
    }
}

// Gauges panic outside 0..=1; NaN from a misbehaving service maps to empty.
fn clamp_ratio(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
