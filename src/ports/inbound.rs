//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI invokes application use cases.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive loop: prompt for a URL, analyze, render, repeat.
    async fn run(&self) -> Result<(), DomainError>;

    /// Analyze a single URL and render the result. Used for one-shot invocations.
    async fn run_once(&self, url: &str) -> Result<(), DomainError>;
}
