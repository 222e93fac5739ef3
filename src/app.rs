use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

use crate::clipboard::{normalize_pasted_text, ClipboardManager};
use crate::controller::SubmissionController;
use crate::events::{apply_edit, map_key, Action};
use crate::grading::GradingClient;
use crate::ui::UI;

/// Interactive grading form
pub struct App {
    controller: Arc<SubmissionController>,
    ui: UI,
    clipboard: ClipboardManager,
    submission: Option<JoinHandle<()>>,
    should_quit: bool,
}

impl App {
    pub fn new(client: Arc<dyn GradingClient>) -> Self {
        Self {
            controller: Arc::new(SubmissionController::new(client)),
            ui: UI::new(),
            clipboard: ClipboardManager::new(),
            submission: None,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &Arc<SubmissionController> {
        &self.controller
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        // Check if we're running in a proper terminal
        if !io::stdout().is_tty() {
            return Err(anyhow::anyhow!(
                "essay-grader requires a terminal (TTY). Use `essay-grader grade FILE` for non-interactive grading."
            ));
        }

        // Setup terminal; the guard restores it on every way out of here
        enable_raw_mode().map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}", e))?;
        let guard = TerminalGuard::new(io::stdout());
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|e| anyhow::anyhow!("Failed to setup terminal: {}", e))?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)
            .map_err(|e| anyhow::anyhow!("Failed to create terminal: {}", e))?;

        let result = self.run_loop(&mut terminal).await;
        drop(guard);

        if let Some(handle) = self.submission.take() {
            if !handle.is_finished() {
                tracing::info!("Exiting with a grading request still in flight");
            }
        }

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_millis(50);

        loop {
            let snapshot = self.controller.snapshot();
            terminal.draw(|f| self.ui.render(f, &snapshot))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.handle_action(map_key(key)),
                    Event::Paste(text) => self.paste_text(&text),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply one user action to the form
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Submit => self.submit(),
            Action::Paste => match self.clipboard.paste() {
                Ok(text) => self.controller.edit_draft(|draft| draft.push_str(&text)),
                Err(e) => tracing::warn!("Paste failed: {}", e),
            },
            Action::None => {}
            edit => {
                self.controller.edit_draft(|draft| {
                    apply_edit(draft, &edit);
                });
            }
        }
    }

    fn paste_text(&mut self, text: &str) {
        let text = normalize_pasted_text(text);
        self.controller.edit_draft(|draft| draft.push_str(&text));
    }

    /// Start grading in the background; the UI keeps drawing while it runs
    fn submit(&mut self) {
        if !self.controller.can_submit() {
            tracing::debug!("Submit ignored: nothing to grade or a request is pending");
            return;
        }

        if self.submission.as_ref().is_some_and(|handle| !handle.is_finished()) {
            tracing::debug!("Submit ignored: previous submission task still running");
            return;
        }

        let controller = Arc::clone(&self.controller);
        self.submission = Some(tokio::spawn(async move {
            controller.submit().await;
        }));
    }

    /// Wait for the background submission, if any
    pub async fn wait_for_submission(&mut self) {
        if let Some(handle) = self.submission.take() {
            if let Err(e) = handle.await {
                tracing::error!("Grading task failed: {}", e);
            }
        }
    }
}

/// Leaves raw mode and the alternate screen when dropped
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::error!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, DisableBracketedPaste, Show) {
            tracing::error!("Failed to restore terminal: {}", e);
        }
    }
}
