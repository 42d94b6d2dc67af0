mod error;
pub use error::ProbeError;

mod observation;
pub use observation::Observation;

mod target;
pub use target::{TargetCheck, status_accepted};

mod spec;
pub use spec::ProbeSpec;

mod result;
pub use result::{Outcome, ProbeResult};

mod checker;
pub use checker::Checker;

mod network_checker;
pub use network_checker::NetworkChecker;

mod pid_file;
mod command;

mod probe;
pub use probe::{ReadinessProbe, DEFAULT_CHECK_TIMEOUT};

pub use tokio_util::sync::CancellationToken;
