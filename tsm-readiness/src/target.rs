use std::fmt;
use std::path::PathBuf;
use reqwest::{Method, Url};

use crate::ProbeError;


/// What a probe observes. Every variant except `Composite` is a leaf check.
#[derive(Debug, PartialEq, Clone)]
pub enum TargetCheck {
    /// Some process accepts TCP connections on (host, port)
    PortListening {
        host: String,
        port: u16,
    },
    /// Nothing accepts TCP connections on (host, port) any more
    PortClosed {
        host: String,
        port: u16,
    },
    /// The response status is in `accepted_statuses` (empty means any 2xx)
    Http {
        method: String,
        url: String,
        accepted_statuses: Vec<u16>,
    },
    /// The pid file exists and the process it names is alive
    PidFile {
        path: PathBuf,
    },
    /// The command exits with status 0 within the attempt timeout
    Command {
        executable: String,
        arguments: Vec<String>,
    },
    /// All checks pass, evaluated in order within the same attempt
    Composite(Vec<TargetCheck>),
}


impl TargetCheck {
    pub fn port_listening(host: &str, port: u16) -> TargetCheck {
        return TargetCheck::PortListening {
            host: String::from(host),
            port,
        };
    }

    pub fn port_closed(host: &str, port: u16) -> TargetCheck {
        return TargetCheck::PortClosed {
            host: String::from(host),
            port,
        };
    }

    pub fn http_get(url: &str, accepted_statuses: Vec<u16>) -> TargetCheck {
        return TargetCheck::Http {
            method: String::from("GET"),
            url: String::from(url),
            accepted_statuses,
        };
    }

    pub fn pid_file(path: PathBuf) -> TargetCheck {
        return TargetCheck::PidFile { path };
    }

    pub fn command(executable: &str, arguments: Vec<String>) -> TargetCheck {
        return TargetCheck::Command {
            executable: String::from(executable),
            arguments,
        };
    }

    /// Leaf checks in evaluation order. Nested composites are flattened.
    pub fn leaves(&self) -> Vec<&TargetCheck> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        return leaves;
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a TargetCheck>) {
        match self {
            TargetCheck::Composite(checks) => {
                for check in checks {
                    check.collect_leaves(leaves);
                }
            },
            _ => leaves.push(self),
        }
    }

    pub fn validate(&self) -> Result<(), ProbeError> {
        match self {
            TargetCheck::PortListening { host, port } => validate_address(host, *port),
            TargetCheck::PortClosed { host, port } => validate_address(host, *port),
            TargetCheck::Http { method, url, accepted_statuses } => {
                validate_http(method, url, accepted_statuses)
            },
            TargetCheck::PidFile { path } => {
                if path.as_os_str().is_empty() {
                    return Err(ProbeError::InvalidSpec(String::from("Pid file path is empty")));
                }
                Ok(())
            },
            TargetCheck::Command { executable, .. } => {
                if executable.trim().is_empty() {
                    return Err(ProbeError::InvalidSpec(String::from("Command executable is empty")));
                }
                Ok(())
            },
            TargetCheck::Composite(checks) => {
                if checks.is_empty() {
                    return Err(ProbeError::InvalidSpec(String::from("Composite check has no checks")));
                }

                for check in checks {
                    check.validate()?;
                }
                Ok(())
            },
        }
    }
}


fn validate_address(host: &str, port: u16) -> Result<(), ProbeError> {
    if host.trim().is_empty() {
        return Err(ProbeError::InvalidSpec(String::from("Host is empty")));
    }

    if port == 0 {
        return Err(ProbeError::InvalidSpec(format!("Port 0 is not a valid probe port for host {}", host)));
    }

    return Ok(());
}


fn validate_http(method: &str, url: &str, accepted_statuses: &[u16]) -> Result<(), ProbeError> {
    if Method::from_bytes(method.as_bytes()).is_err() {
        return Err(ProbeError::InvalidSpec(format!("Invalid HTTP method: {}", method)));
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(error) => {
            return Err(ProbeError::InvalidSpec(format!("Invalid URL {}: {}", url, error)));
        }
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ProbeError::InvalidSpec(format!("Unsupported URL scheme {} in {}", parsed.scheme(), url)));
    }

    for status in accepted_statuses {
        if !(100..=599).contains(status) {
            return Err(ProbeError::InvalidSpec(format!("Invalid HTTP status code: {}", status)));
        }
    }

    return Ok(());
}


/// An empty accepted set means any 2xx.
pub fn status_accepted(accepted_statuses: &[u16], status: u16) -> bool {
    if accepted_statuses.is_empty() {
        return (200..300).contains(&status);
    }

    return accepted_statuses.contains(&status);
}


impl fmt::Display for TargetCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            TargetCheck::PortListening { host, port } => write!(f, "tcp {}:{} listening", host, port),
            TargetCheck::PortClosed { host, port } => write!(f, "tcp {}:{} closed", host, port),
            TargetCheck::Http { method, url, accepted_statuses } => {
                if accepted_statuses.is_empty() {
                    write!(f, "{} {} expecting 2xx", method, url)
                } else {
                    write!(f, "{} {} expecting {:?}", method, url, accepted_statuses)
                }
            },
            TargetCheck::PidFile { path } => write!(f, "pid file {}", path.display()),
            TargetCheck::Command { executable, arguments } => {
                if arguments.is_empty() {
                    write!(f, "command {}", executable)
                } else {
                    write!(f, "command {} {}", executable, arguments.join(" "))
                }
            },
            TargetCheck::Composite(checks) => {
                let descriptions: Vec<String> = checks.iter().map(|check| check.to_string()).collect();
                write!(f, "{}", descriptions.join(" then "))
            },
        };
    }
}
