use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidRetentionError;

/// What the task tracker does with a finished task once it has been read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RetentionPolicy {
    /// Keep every task for the lifetime of the process
    #[default]
    Retain,
    /// Drop a completed or failed task after the first read that observes it
    EvictOnRead,
}

impl RetentionPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::EvictOnRead => "evict_on_read",
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RetentionPolicy {
    type Err = InvalidRetentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "retain" => Ok(Self::Retain),
            "evict_on_read" => Ok(Self::EvictOnRead),
            _ => Err(InvalidRetentionError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_policies() {
        assert_eq!("retain".parse::<RetentionPolicy>().unwrap(), RetentionPolicy::Retain);
        assert_eq!(
            "evict-on-read".parse::<RetentionPolicy>().unwrap(),
            RetentionPolicy::EvictOnRead
        );
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = "forever".parse::<RetentionPolicy>().unwrap_err();
        assert!(err.to_string().contains("forever"));
    }

    #[test]
    fn default_retains() {
        assert_eq!(RetentionPolicy::default(), RetentionPolicy::Retain);
    }
}
