use std::path::Path;
use sysinfo::{Pid, PidExt, ProcessRefreshKind, System, SystemExt};
use log::trace;

use crate::Observation;


/// Passes if the pid file names a live process, like `test -f $PID_FILE && kill -0 $(cat $PID_FILE)`.
pub async fn check_pid_file(path: &Path) -> Observation {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(error) => {
            return Observation::Failed(format!("cannot read pid file {}: {}", path.display(), error));
        }
    };

    let pid = match parse_pid(&content) {
        Some(pid) => pid,
        None => {
            return Observation::Failed(format!("pid file {} does not contain a pid", path.display()));
        }
    };

    return match tokio::task::spawn_blocking(move || pid_exists(pid)).await {
        Ok(true) => Observation::Passed(format!("pid {} is running", pid)),
        Ok(false) => Observation::Failed(format!("pid {} is not running", pid)),
        Err(error) => Observation::Failed(format!("looking up pid {} failed: {}", pid, error)),
    };
}


fn parse_pid(content: &str) -> Option<u32> {
    return match content.trim().parse::<u32>() {
        Ok(0) => None,
        Ok(pid) => Some(pid),
        Err(_) => None,
    };
}


fn pid_exists(pid: u32) -> bool {
    let mut system = System::new();
    let exists = system.refresh_process_specifics(Pid::from_u32(pid), ProcessRefreshKind::new());
    trace!("pid {} exists: {}", pid, exists);
    return exists;
}
