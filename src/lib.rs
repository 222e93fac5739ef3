pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod events;
pub mod grading;
pub mod logging;
pub mod ui;

pub use app::App;
pub use config::GraderConfig;
pub use controller::{ControllerSnapshot, Outcome, SubmissionController, SubmissionState};
pub use grading::{GradingClient, GradingError, GradingResult, HttpGradingClient};
