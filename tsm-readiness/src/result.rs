use std::fmt;
use std::time::Duration;

use crate::Observation;


#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Outcome {
    Ready,
    TimedOut,
    Cancelled,
    Error,
}


impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self {
            Outcome::Ready => "Ready",
            Outcome::TimedOut => "Timed out",
            Outcome::Cancelled => "Cancelled",
            Outcome::Error => "Error",
        };

        return write!(f, "{}", outcome);
    }
}


/// Produced exactly once per `wait_until_ready` call.
#[derive(Debug, PartialEq, Clone)]
pub struct ProbeResult {
    outcome: Outcome,
    attempts: u32,
    elapsed: Duration,
    last_observation: Option<Observation>,
}


impl ProbeResult {
    pub fn new(
        outcome: Outcome,
        attempts: u32,
        elapsed: Duration,
        last_observation: Option<Observation>,
    ) -> ProbeResult {
        return ProbeResult {
            outcome,
            attempts,
            elapsed,
            last_observation,
        };
    }

    pub fn get_outcome(&self) -> Outcome {
        return self.outcome;
    }

    pub fn is_ready(&self) -> bool {
        return self.outcome == Outcome::Ready;
    }

    /// Includes an attempt abandoned by cancellation
    pub fn get_attempts(&self) -> u32 {
        return self.attempts;
    }

    pub fn get_elapsed(&self) -> Duration {
        return self.elapsed;
    }

    pub fn get_last_observation(&self) -> Option<&Observation> {
        return self.last_observation.as_ref();
    }
}
