use std::time::Duration;
use log::{debug, info, error};
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::{Checker, NetworkChecker, Observation, Outcome, ProbeError, ProbeResult, ProbeSpec, TargetCheck};


/// Timeout of a single `is_ready` evaluation
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);


/// Polls a target until it is ready. Holds no state between calls, so one probe
/// can serve any number of concurrent waits.
#[derive(Debug, Clone)]
pub struct ReadinessProbe<C: Checker = NetworkChecker> {
    checker: C,
}


impl ReadinessProbe<NetworkChecker> {
    pub fn new() -> Result<ReadinessProbe<NetworkChecker>, ProbeError> {
        let checker = NetworkChecker::new()?;
        return Ok(ReadinessProbe::with_checker(checker));
    }
}


impl<C: Checker> ReadinessProbe<C> {
    pub fn with_checker(checker: C) -> ReadinessProbe<C> {
        return ReadinessProbe { checker };
    }

    /// Single point-in-time evaluation, no polling.
    pub async fn is_ready(&self, target: &TargetCheck) -> bool {
        return self.observe(target, DEFAULT_CHECK_TIMEOUT).await.is_passed();
    }

    /// Evaluates the leaves of `target` in declared order and stops at the first one
    /// that does not pass. `timeout` bounds the whole evaluation.
    pub async fn observe(&self, target: &TargetCheck, timeout: Duration) -> Observation {
        let started = Instant::now();
        let mut observation = Observation::Failed(String::from("no checks to evaluate"));

        for leaf in target.leaves() {
            let remaining = timeout.saturating_sub(started.elapsed());

            observation = match tokio::time::timeout(remaining, self.checker.check(leaf, remaining)).await {
                Ok(observation) => observation,
                Err(_) => Observation::Failed(format!("{} timed out after {:?}", leaf, timeout)),
            };

            if !observation.is_passed() {
                break;
            }
        }

        return observation;
    }

    /// Polls `spec.target` until it passes, the attempt/deadline budget is exhausted or
    /// `cancel` fires. Only an invalid spec is an error; it is reported before any check runs.
    pub async fn wait_until_ready(
        &self,
        spec: ProbeSpec,
        cancel: CancellationToken,
    ) -> Result<ProbeResult, ProbeError> {
        let started = Instant::now();
        spec.validate(started)?;

        let target = spec.get_target();
        let description = target.to_string();
        let mut attempts: u32 = 0;
        let mut last_observation: Option<Observation> = None;

        loop {
            if cancel.is_cancelled() {
                debug!("Probe {} cancelled after {} attempts", description, attempts);
                return Ok(ProbeResult::new(Outcome::Cancelled, attempts, started.elapsed(), last_observation));
            }

            attempts += 1;
            let timeout = spec.effective_attempt_timeout(Instant::now());

            let observation = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Probe {} cancelled during attempt {}", description, attempts);
                    return Ok(ProbeResult::new(Outcome::Cancelled, attempts, started.elapsed(), last_observation));
                },
                observation = self.observe(target, timeout) => observation,
            };

            if observation.is_passed() {
                debug!("Probe {} ready after {} attempts: {}", description, attempts, observation.get_detail());
                return Ok(ProbeResult::new(Outcome::Ready, attempts, started.elapsed(), Some(observation)));
            }

            if observation.is_fatal() {
                error!("Probe {} cannot succeed: {}", description, observation.get_detail());
                return Ok(ProbeResult::new(Outcome::Error, attempts, started.elapsed(), Some(observation)));
            }

            let elapsed_ms = started.elapsed().as_millis() as u64;
            info!(
                check = description.as_str(),
                attempt = attempts,
                observation = observation.get_detail(),
                elapsed_ms = elapsed_ms;
                "Probe {} not ready on attempt {}: {}", description, attempts, observation.get_detail()
            );
            last_observation = Some(observation);

            if let Some(max_attempts) = spec.get_max_attempts() {
                if attempts >= max_attempts {
                    return Ok(timed_out(&description, attempts, started, last_observation));
                }
            }

            let mut pause = spec.get_interval();
            if let Some(deadline) = spec.get_deadline() {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(timed_out(&description, attempts, started, last_observation));
                }
                pause = pause.min(deadline - now);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Probe {} cancelled while waiting for attempt {}", description, attempts + 1);
                    return Ok(ProbeResult::new(Outcome::Cancelled, attempts, started.elapsed(), last_observation));
                },
                _ = sleep(pause) => {},
            }

            if let Some(deadline) = spec.get_deadline() {
                if Instant::now() >= deadline {
                    return Ok(timed_out(&description, attempts, started, last_observation));
                }
            }
        }
    }
}


fn timed_out(
    description: &str,
    attempts: u32,
    started: Instant,
    last_observation: Option<Observation>,
) -> ProbeResult {
    let last = match &last_observation {
        Some(observation) => observation.to_string(),
        None => String::from("none"),
    };
    debug!("Probe {} timed out after {} attempts, last observation: {}", description, attempts, last);

    return ProbeResult::new(Outcome::TimedOut, attempts, started.elapsed(), last_observation);
}
