//! Jobwatch Core
//!
//! Core types and pure logic for the Jobwatch job-board scanner.
//!
//! This crate contains:
//! - Domain types: the canonical Job and the source configuration
//! - Filter: title keyword matching
//! - Digest: rendering a batch of jobs into a notification

pub mod digest;
pub mod domain;
pub mod filter;

pub use digest::Digest;
pub use domain::job::{Job, Location};
pub use domain::source::{SourceConfig, SourceKind};
pub use filter::KeywordFilter;
