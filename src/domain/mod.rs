//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod terms;
pub mod video_ref;

pub use entities::{
    AggregationResult, AnalysisReport, Comment, CommentPage, EngagementStats, LabeledComment,
    SentimentLabel, TermGroup, TermWeight,
};
pub use errors::DomainError;
pub use video_ref::VideoRef;
