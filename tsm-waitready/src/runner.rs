use futures::future::join_all;
use log::info;
use tokio::time::Instant;
use tsm_readiness::{CancellationToken, Checker, Outcome, ProbeError, ProbeResult, ReadinessProbe};

use crate::config::Probe;


pub const EXIT_READY: i32 = 0;
pub const EXIT_INVALID_SPEC: i32 = 11;
pub const EXIT_TIMED_OUT: i32 = 20;
pub const EXIT_CANCELLED: i32 = 30;
pub const EXIT_ERROR: i32 = 40;


#[derive(Debug)]
pub struct Report {
    name: String,
    result: Result<ProbeResult, ProbeError>,
}


impl Report {
    pub fn new(name: String, result: Result<ProbeResult, ProbeError>) -> Report {
        return Report { name, result };
    }

    pub fn get_name(&self) -> &str {
        return &self.name;
    }

    pub fn get_result(&self) -> &Result<ProbeResult, ProbeError> {
        return &self.result;
    }
}


pub struct Runner {}


impl Runner {
    /// Waits for all probes at once. Deadlines count from the start of the run.
    pub async fn run<C: Checker>(
        readiness_probe: &ReadinessProbe<C>,
        probes: &[Probe],
        cancel: CancellationToken,
    ) -> Vec<Report> {
        let started = Instant::now();

        let waits = probes.iter().map(|probe| {
            let name = probe.get_name();
            let spec = probe.build_spec(started);
            let cancel = cancel.clone();

            async move {
                let result = match spec {
                    Ok(spec) => {
                        info!("Waiting for {}: {}", name, spec.get_target());
                        readiness_probe.wait_until_ready(spec, cancel).await
                    },
                    Err(e) => Err(ProbeError::InvalidSpec(e)),
                };
                Report::new(name, result)
            }
        });

        return join_all(waits).await;
    }

    /// The most severe outcome across all reports wins
    pub fn exit_code(reports: &[Report]) -> i32 {
        let mut exit_code = EXIT_READY;

        for report in reports {
            let code = match report.get_result() {
                Err(_) => EXIT_INVALID_SPEC,
                Ok(result) => match result.get_outcome() {
                    Outcome::Ready => EXIT_READY,
                    Outcome::TimedOut => EXIT_TIMED_OUT,
                    Outcome::Cancelled => EXIT_CANCELLED,
                    Outcome::Error => EXIT_ERROR,
                },
            };

            exit_code = exit_code.max(code);
        }

        return exit_code;
    }
}
