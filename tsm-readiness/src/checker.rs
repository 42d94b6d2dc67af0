use std::time::Duration;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{Observation, TargetCheck};


/// Evaluates a single leaf check once. Composite targets are split up by the probe
/// and never reach a checker.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Checker: Send + Sync {
    async fn check(&self, target: &TargetCheck, timeout: Duration) -> Observation;
}
