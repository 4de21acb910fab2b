//! Sentiment adapter module. Implements SentimentPort.
//!
//! Provides the artifact-backed linear model and a mock adapter for testing.

pub mod linear_model;
pub mod mock_adapter;

pub use linear_model::{LinearSentimentModel, ModelSentimentAdapter};
pub use mock_adapter::MockSentimentAdapter;
