use std::time::Duration;
use serde::Deserialize;
use tokio::time::Instant;
use tsm_readiness::{ProbeSpec, TargetCheck};

use crate::config::Check;


/// interval_ms: pause between attempts, defaults to 1000
/// deadline_s: counted from the start of the run
/// Without max_attempts and deadline_s the probe is rejected when it runs.
#[derive(Deserialize, Debug, Clone)]
pub struct Probe {
    name: String,
    interval_ms: Option<u64>,
    max_attempts: Option<u32>,
    deadline_s: Option<u64>,
    timeout_ms: Option<u64>,
    checks: Vec<Check>,
}


impl Probe {
    pub fn get_name(&self) -> String {
        return self.name.clone();
    }

    pub fn get_interval(&self) -> Duration {
        return Duration::from_millis(self.interval_ms.unwrap_or(1000));
    }

    /// A single check is used as is, several checks run in declared order
    pub fn build_target(&self) -> TargetCheck {
        if self.checks.len() == 1 {
            return self.checks[0].build_target();
        }

        return TargetCheck::Composite(self.checks.iter().map(|check| check.build_target()).collect());
    }

    pub fn build_spec(&self, started: Instant) -> Result<ProbeSpec, String> {
        let mut spec = ProbeSpec::new(self.build_target(), self.get_interval());

        if let Some(max_attempts) = self.max_attempts {
            spec = spec.with_max_attempts(max_attempts);
        }

        if let Some(deadline_s) = self.deadline_s {
            let deadline = match started.checked_add(Duration::from_secs(deadline_s)) {
                Some(deadline) => deadline,
                None => return Err(format!("deadline_s {} of probe {} is out of range", deadline_s, self.name)),
            };
            spec = spec.with_deadline(deadline);
        }

        if let Some(timeout_ms) = self.timeout_ms {
            spec = spec.with_attempt_timeout(Duration::from_millis(timeout_ms));
        }

        return Ok(spec);
    }
}
