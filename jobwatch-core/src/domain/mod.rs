//! Core domain types
//!
//! These types are shared between the board clients (which produce raw
//! postings) and the scanner (which normalizes, filters and notifies).

pub mod job;
pub mod source;
