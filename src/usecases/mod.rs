//! Application use cases. Orchestrate domain logic via ports.

pub mod aggregator;
pub mod analysis_service;
pub mod comment_fetcher;
pub mod engagement_reader;
pub mod sentiment_classifier;

pub use aggregator::Aggregator;
pub use analysis_service::{AnalysisOptions, AnalysisService};
pub use comment_fetcher::CommentFetcher;
pub use engagement_reader::EngagementReader;
pub use sentiment_classifier::SentimentClassifier;
