//! Scheduler layer
//!
//! Drives scan cycles: a single cycle for externally scheduled runs, or a
//! polling loop in watch mode.

pub mod poller;
pub mod scanner;

pub use poller::ScanPoller;
pub use scanner::{CycleOutcome, Scanner};
