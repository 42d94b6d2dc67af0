use log::{warn, error};
use tabled::{builder::Builder, settings::Style};
use tsm_readiness::Outcome;

use crate::runner::Report;


/// Logs what an operator needs to diagnose a probe that did not get ready
pub fn log_reports(reports: &[Report]) {
    for report in reports {
        match report.get_result() {
            Ok(result) if result.get_outcome() == Outcome::TimedOut => {
                let last_observation = match result.get_last_observation() {
                    Some(observation) => observation.to_string(),
                    None => String::from("none"),
                };
                warn!("{} did not get ready after {} attempts, last observation: {}",
                      report.get_name(), result.get_attempts(), last_observation);
            },
            Ok(_) => {},
            Err(e) => {
                error!("{} was not run: {}", report.get_name(), e);
            },
        }
    }
}


pub fn build_table(reports: &[Report]) -> String {
    let mut builder = Builder::new();
    builder.set_header(vec!["PROBE", "OUTCOME", "ATTEMPTS", "ELAPSED", "LAST OBSERVATION"]);

    for report in reports {
        let row = match report.get_result() {
            Ok(result) => {
                let last_observation = match result.get_last_observation() {
                    Some(observation) => observation.to_string(),
                    None => String::from("-"),
                };

                [
                    report.get_name().to_string(),
                    result.get_outcome().to_string(),
                    result.get_attempts().to_string(),
                    humantime::format_duration(result.get_elapsed()).to_string(),
                    last_observation,
                ]
            },
            Err(e) => [
                report.get_name().to_string(),
                String::from("Invalid"),
                String::from("0"),
                String::from("0s"),
                e.to_string(),
            ],
        };

        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::modern());

    return table.to_string();
}


pub fn print_reports(reports: &[Report]) {
    log_reports(reports);
    println!("{}", build_table(reports));
}
