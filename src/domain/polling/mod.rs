//! Readiness polling domain module

mod poll_policy;

pub use poll_policy::{Backoff, PollPolicy, DEFAULT_MAX_DELAY_SECS, DEFAULT_POLL_INTERVAL_SECS};
