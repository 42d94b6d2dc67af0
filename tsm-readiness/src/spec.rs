use std::time::Duration;
use tokio::time::Instant;

use crate::{ProbeError, TargetCheck};


/// Immutable description of one readiness wait.
/// At least one of max_attempts and deadline must be set; whichever is reached first stops polling.
#[derive(Debug, Clone)]
pub struct ProbeSpec {
    target: TargetCheck,
    interval: Duration,
    max_attempts: Option<u32>,
    deadline: Option<Instant>,
    attempt_timeout: Option<Duration>,
}


impl ProbeSpec {
    pub fn new(target: TargetCheck, interval: Duration) -> ProbeSpec {
        return ProbeSpec {
            target,
            interval,
            max_attempts: None,
            deadline: None,
            attempt_timeout: None,
        };
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> ProbeSpec {
        self.max_attempts = Some(max_attempts);
        return self;
    }

    pub fn with_deadline(mut self, deadline: Instant) -> ProbeSpec {
        self.deadline = Some(deadline);
        return self;
    }

    /// Never exceeds the interval, see `effective_attempt_timeout`
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> ProbeSpec {
        self.attempt_timeout = Some(attempt_timeout);
        return self;
    }

    pub fn get_target(&self) -> &TargetCheck {
        return &self.target;
    }

    pub fn get_interval(&self) -> Duration {
        return self.interval;
    }

    pub fn get_max_attempts(&self) -> Option<u32> {
        return self.max_attempts;
    }

    pub fn get_deadline(&self) -> Option<Instant> {
        return self.deadline;
    }

    pub fn get_attempt_timeout(&self) -> Option<Duration> {
        return self.attempt_timeout;
    }

    pub fn validate(&self, now: Instant) -> Result<(), ProbeError> {
        if self.interval.is_zero() {
            return Err(ProbeError::InvalidSpec(String::from("Interval must be greater than zero")));
        }

        if self.max_attempts.is_none() && self.deadline.is_none() {
            return Err(ProbeError::InvalidSpec(String::from("Either max attempts or a deadline must be set")));
        }

        if let Some(0) = self.max_attempts {
            return Err(ProbeError::InvalidSpec(String::from("Max attempts must be at least 1")));
        }

        if let Some(deadline) = self.deadline {
            if deadline <= now {
                return Err(ProbeError::InvalidSpec(String::from("Deadline has already passed")));
            }
        }

        if let Some(attempt_timeout) = self.attempt_timeout {
            if attempt_timeout.is_zero() {
                return Err(ProbeError::InvalidSpec(String::from("Attempt timeout must be greater than zero")));
            }
        }

        return self.target.validate();
    }

    /// Per-attempt I/O bound: the configured timeout (or the interval), capped by the interval
    /// and by the time left until the deadline.
    pub fn effective_attempt_timeout(&self, now: Instant) -> Duration {
        let timeout = self.attempt_timeout.unwrap_or(self.interval).min(self.interval);

        return match self.deadline {
            Some(deadline) => timeout.min(deadline.saturating_duration_since(now)),
            None => timeout,
        };
    }
}
