use std::path::PathBuf;
use serde::Deserialize;
use tsm_readiness::TargetCheck;


const DEFAULT_HOST: &str = "localhost";
const DEFAULT_METHOD: &str = "GET";


#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Check {
    PortListening {
        host: Option<String>,
        port: u16,
    },
    PortClosed {
        host: Option<String>,
        port: u16,
    },
    Http {
        url: String,
        method: Option<String>,
        accepted_statuses: Option<Vec<u16>>,
    },
    PidFile {
        path: String,
    },
    Command {
        executable: String,
        arguments: Option<Vec<String>>,
    },
}


impl Check {
    pub fn build_target(&self) -> TargetCheck {
        return match self {
            Check::PortListening { host, port } => TargetCheck::PortListening {
                host: host.clone().unwrap_or(String::from(DEFAULT_HOST)),
                port: *port,
            },
            Check::PortClosed { host, port } => TargetCheck::PortClosed {
                host: host.clone().unwrap_or(String::from(DEFAULT_HOST)),
                port: *port,
            },
            Check::Http { url, method, accepted_statuses } => TargetCheck::Http {
                method: method.clone().unwrap_or(String::from(DEFAULT_METHOD)).to_uppercase(),
                url: url.clone(),
                accepted_statuses: accepted_statuses.clone().unwrap_or_default(),
            },
            Check::PidFile { path } => TargetCheck::PidFile {
                path: PathBuf::from(path),
            },
            Check::Command { executable, arguments } => TargetCheck::Command {
                executable: executable.clone(),
                arguments: arguments.clone().unwrap_or_default(),
            },
        };
    }
}
