use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::GraderConfig;
use crate::controller::{ControllerSnapshot, SubmissionController};
use crate::grading::{GradingResult, HttpGradingClient, SUBMISSION_FAILED_MESSAGE};

/// essay-grader - Submit essays to a grading service from the terminal
#[derive(Parser)]
#[command(name = "essay-grader")]
#[command(about = "A terminal client for a remote essay grading service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Grading service base URL (overrides the config file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Grade one essay and print the result
    Grade(GradeArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct GradeArgs {
    /// Essay file to grade (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default configuration if no config file exists
    #[arg(long)]
    pub init: bool,
}

impl Cli {
    /// Path of the config file in effect
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(GraderConfig::default_path()?),
        }
    }

    /// Load the config file and apply command line overrides
    pub async fn load_config(&self) -> Result<GraderConfig> {
        let path = self.config_path()?;
        let mut config = GraderConfig::load_from_file(&path).await?;

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
            config.validate()?;
        }

        Ok(config)
    }
}

/// Command-line interface handler
pub struct CliHandler {
    config: GraderConfig,
    config_path: PathBuf,
}

impl CliHandler {
    /// Create a new CLI handler
    pub fn new(config: GraderConfig, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Grade(args) => self.handle_grade(args).await,
            Commands::Config(args) => self.handle_config(args).await,
        }
    }

    /// Grade one essay through the same controller the UI uses
    async fn handle_grade(&self, args: GradeArgs) -> Result<()> {
        let essay = match &args.file {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?,
            None => read_essay(tokio::io::stdin()).await?,
        };

        let client = HttpGradingClient::from_config(&self.config)?;
        let controller = SubmissionController::new(Arc::new(client));
        controller.set_draft(essay);

        if !controller.can_submit() {
            return Err(anyhow!("Essay is empty, nothing to grade"));
        }

        controller.submit().await;
        let snapshot = controller.snapshot();

        match (&snapshot.error, &snapshot.result) {
            (None, Some(result)) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else {
                    print!("{}", render_text_report(result));
                }
                Ok(())
            }
            _ => Err(anyhow!(failure_message(&snapshot))),
        }
    }

    async fn handle_config(&self, args: ConfigArgs) -> Result<()> {
        if args.init {
            if self.config_path.exists() {
                println!("Config already exists at {}", self.config_path.display());
            } else {
                GraderConfig::default().save_to_file(&self.config_path).await?;
                println!("Wrote default config to {}", self.config_path.display());
            }
            return Ok(());
        }

        println!("Config file: {}", self.config_path.display());
        println!("Grading URL: {}", self.config.grading_url()?);
        println!("Request timeout: {}s", self.config.request_timeout_secs);
        if let Some(log_path) = self.config.log_path() {
            println!("Log file: {}", log_path.display());
        }
        Ok(())
    }
}

fn failure_message(snapshot: &ControllerSnapshot) -> String {
    snapshot
        .error
        .clone()
        .unwrap_or_else(|| SUBMISSION_FAILED_MESSAGE.to_string())
}

/// Plain-text version of the scores and feedback panels
pub fn render_text_report(result: &GradingResult) -> String {
    format!(
        "Grading And Scores\n  Grade: {}\n  Score: {}\n\n\
         AI Analysis and Feedback\n  Grammar Check: {}\n  Vocabulary Diversity: {}\n  Readability Score: {}\n\n\
         AI Feedback\n  {}\n",
        result.grade_label(),
        result.percentage_label(),
        result.grammar_label(),
        result.vocabulary_label(),
        result.readability_label(),
        result.feedback,
    )
}

/// Read a whole essay from a stream such as stdin
async fn read_essay<R: AsyncRead + Unpin>(mut reader: R) -> Result<String> {
    let mut essay = String::new();
    reader
        .read_to_string(&mut essay)
        .await
        .map_err(|e| anyhow!("Failed to read essay: {}", e))?;
    Ok(essay)
}
