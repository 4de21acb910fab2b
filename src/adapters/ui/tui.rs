//! Implements InputPort. Inquire-based interactive prompt loop.
//!
//! Prompts for a URL, runs the pipeline, renders the report. Per-request failures
//! are shown and the loop continues; only fatal errors end it.

use crate::adapters::ui::{progress, render};
use crate::domain::DomainError;
use crate::ports::InputPort;
use crate::usecases::AnalysisService;
use async_trait::async_trait;
use crossterm::style::Stylize;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Text};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Colored text report.
    Pretty,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// Applies the neon prompt theme globally.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("▶").with_fg(Color::LightMagenta))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(Color::LightCyan));
    inquire::set_global_render_config(config);
}

/// Message for failures that end one request but not the session. `None` for fatal errors.
pub fn user_message(err: &DomainError) -> Option<String> {
    match err {
        DomainError::Parse(_) => Some(
            "Please enter a valid YouTube link (https://youtu.be/<id> or https://www.youtube.com/watch?v=<id>).".to_string(),
        ),
        DomainError::NotFound(id) => Some(format!("Video '{}' does not exist or is not public.", id)),
        DomainError::Transient(msg) => Some(format!(
            "YouTube did not respond in time or rate-limited the request, try again later ({}).",
            msg
        )),
        DomainError::Api(msg) => Some(format!("YouTube rejected the request: {}", msg)),
        DomainError::ModelLoad(_) | DomainError::Classifier(_) | DomainError::Config(_) => None,
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    service: Arc<AnalysisService>,
    output: OutputMode,
}

impl TuiInputPort {
    pub fn new(service: Arc<AnalysisService>, output: OutputMode) -> Self {
        Self { service, output }
    }

    async fn analyze_and_render(&self, url: &str) -> Result<(), DomainError> {
        let pb = (self.output == OutputMode::Pretty)
            .then(|| progress::spinner("Fetching and classifying comments..."));
        let result = self.service.analyze_url(url).await;
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        let report = result?;

        match self.output {
            OutputMode::Pretty => print!("{}", render::format_report(&report)),
            OutputMode::Json => println!("{}", render::format_json(&report)?),
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let url = match Text::new("YouTube video URL:")
                .with_help_message("Enter on empty input or Esc to quit")
                .prompt()
            {
                Ok(url) => url,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(e) => return Err(DomainError::Config(format!("prompt failed: {}", e))),
            };
            if url.trim().is_empty() {
                break;
            }

            if let Err(e) = self.analyze_and_render(&url).await {
                match user_message(&e) {
                    Some(msg) => eprintln!("{}", msg.red()),
                    None => return Err(e),
                }
            }
        }
        Ok(())
    }

    async fn run_once(&self, url: &str) -> Result<(), DomainError> {
        self.analyze_and_render(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_request_failures_have_messages() {
        assert!(user_message(&DomainError::Parse("x".into())).is_some());
        let msg = user_message(&DomainError::NotFound("abc123XYZ0".into())).unwrap();
        assert!(msg.contains("abc123XYZ0"));
        assert!(user_message(&DomainError::Transient("timeout".into())).is_some());
    }

    #[test]
    fn fatal_failures_end_the_session() {
        assert!(user_message(&DomainError::ModelLoad("gone".into())).is_none());
        assert!(user_message(&DomainError::Config("bad".into())).is_none());
    }
}
