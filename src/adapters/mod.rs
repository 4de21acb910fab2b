//! Infrastructure adapters. Implement ports.
//!
//! YouTube Data API, sentiment model artifacts, terminal UI. Map errors to DomainError.

pub mod sentiment;
pub mod ui;
pub mod youtube;
