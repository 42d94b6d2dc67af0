use std::io::Error;
use std::process::{Command, Stdio};
use std::time::Duration;
use process_control::{ChildExt, Control, ExitStatus};
use log::trace;

use crate::Observation;


/// Runs the command on the blocking pool. The child is terminated once `timeout` is up,
/// even if the awaiting attempt has already been abandoned.
pub async fn check_command(executable: String, arguments: Vec<String>, timeout: Duration) -> Observation {
    let handle = tokio::task::spawn_blocking(move || run_command(&executable, &arguments, timeout));

    return match handle.await {
        Ok(observation) => observation,
        Err(error) => Observation::Failed(format!("command task failed: {}", error)),
    };
}


fn run_command(executable: &str, arguments: &[String], timeout: Duration) -> Observation {
    let process = Command::new(executable)
        .args(arguments)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match process {
        Ok(child) => child,
        Err(error) => {
            // not installed yet counts as not ready
            return Observation::Failed(format!("cannot execute {}: {}", executable, error));
        }
    };

    let output_result: Result<Option<ExitStatus>, Error> = child
        .controlled()
        .time_limit(timeout)
        .terminate_for_timeout()
        .wait();

    return match output_result {
        Ok(Some(exit_status)) => {
            if exit_status.success() {
                trace!("Command {} succeeded", executable);
                Observation::Passed(format!("{} exited successfully", executable))
            } else {
                Observation::Failed(format!("{} exited with {}", executable, exit_status))
            }
        },
        Ok(None) => Observation::Failed(format!("{} timed out after {:?}", executable, timeout)),
        Err(error) => Observation::Failed(format!("waiting for {} failed: {}", executable, error)),
    };
}
