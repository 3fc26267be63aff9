//! Poll policy value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::InvalidBackoffError;

/// Default wait between readiness checks (5 seconds)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Upper bound for a single exponential wait (60 seconds)
pub const DEFAULT_MAX_DELAY_SECS: u64 = 60;

/// How the wait grows between consecutive readiness checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    #[default]
    Fixed,
    /// Doubles the interval after each pending check, capped at `max_delay`
    Exponential { max_delay: Duration },
}

impl Backoff {
    pub fn exponential() -> Self {
        Self::Exponential {
            max_delay: Duration::from_secs(DEFAULT_MAX_DELAY_SECS),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Exponential { .. } => "exponential",
        }
    }
}

impl fmt::Display for Backoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Backoff {
    type Err = InvalidBackoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "exponential" => Ok(Self::exponential()),
            _ => Err(InvalidBackoffError {
                input: s.to_string(),
            }),
        }
    }
}

/// Governs the wait-until-ready loop against the transcription service.
///
/// `max_attempts = None` keeps polling for as long as the remote file stays
/// pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    max_attempts: Option<u32>,
    backoff: Backoff,
}

impl PollPolicy {
    /// Fixed interval, unlimited attempts
    pub const fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            backoff: Backoff::Fixed,
        }
    }

    /// Zero wait between checks
    pub const fn immediate() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub const fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub const fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    pub const fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Wait before the next check, after `attempt` pending results (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential { max_delay } => {
                let exponent = attempt.saturating_sub(1).min(31);
                self.interval
                    .saturating_mul(1u32 << exponent)
                    .min(max_delay)
            }
        }
    }

    /// Whether `attempts` pending results used up the budget
    pub fn is_exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::fixed(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_polls_every_five_seconds_forever() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval(), Duration::from_secs(5));
        assert_eq!(policy.delay_for(1), Duration::from_secs(5));
        assert_eq!(policy.delay_for(100), Duration::from_secs(5));
        assert!(!policy.is_exhausted(u32::MAX));
    }

    #[test]
    fn immediate_never_waits() {
        assert_eq!(PollPolicy::immediate().delay_for(3), Duration::ZERO);
    }

    #[test]
    fn max_attempts_bounds_the_loop() {
        let policy = PollPolicy::immediate().with_max_attempts(Some(3));
        assert!(!policy.is_exhausted(2));
        assert!(policy.is_exhausted(3));
    }

    #[test]
    fn exponential_doubles_up_to_cap() {
        let policy = PollPolicy::fixed(Duration::from_secs(1)).with_backoff(Backoff::Exponential {
            max_delay: Duration::from_secs(6),
        });
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for(4), Duration::from_secs(6));
        assert_eq!(policy.delay_for(200), Duration::from_secs(6));
    }

    #[test]
    fn backoff_from_str() {
        assert_eq!("fixed".parse::<Backoff>().unwrap(), Backoff::Fixed);
        assert_eq!(
            "Exponential".parse::<Backoff>().unwrap(),
            Backoff::exponential()
        );
        assert!("linear".parse::<Backoff>().is_err());
    }
}
