//! YouTube Data API adapter. Implements the comment and engagement ports over HTTP.

pub mod client;
pub mod dto;
pub mod mapper;

pub use client::YouTubeDataApi;
