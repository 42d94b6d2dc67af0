use std::io::ErrorKind;
use std::time::Duration;
use async_trait::async_trait;
use log::trace;
use reqwest::{redirect, Client, Method};
use tokio::net::TcpStream;

use crate::{Checker, Observation, ProbeError, TargetCheck, status_accepted};
use crate::command::check_command;
use crate::pid_file::check_pid_file;


enum Connection {
    Accepted,
    Refused,
    Unavailable(String),
}


/// Production checker: TCP connects, HTTP requests, pid lookups and commands.
#[derive(Debug, Clone)]
pub struct NetworkChecker {
    client: Client,
}


impl NetworkChecker {
    /// Redirects are not followed, the status of the configured URL is judged
    pub fn new() -> Result<NetworkChecker, ProbeError> {
        let builder = Client::builder().redirect(redirect::Policy::none());

        return match builder.build() {
            Ok(client) => Ok(NetworkChecker { client }),
            Err(error) => Err(ProbeError::Client(error.to_string())),
        };
    }

    async fn check_port_listening(&self, host: &str, port: u16, timeout: Duration) -> Observation {
        return match connect(host, port, timeout).await {
            Connection::Accepted => Observation::Passed(format!("{}:{} is accepting connections", host, port)),
            Connection::Refused => Observation::Failed(format!("{}:{} refused the connection", host, port)),
            Connection::Unavailable(reason) => Observation::Failed(reason),
        };
    }

    async fn check_port_closed(&self, host: &str, port: u16, timeout: Duration) -> Observation {
        return match connect(host, port, timeout).await {
            Connection::Accepted => Observation::Failed(format!("{}:{} is still accepting connections", host, port)),
            Connection::Refused => Observation::Passed(format!("nothing listening on {}:{}", host, port)),
            Connection::Unavailable(reason) => Observation::Failed(reason),
        };
    }

    async fn check_http(
        &self,
        method: &str,
        url: &str,
        accepted_statuses: &[u16],
        timeout: Duration,
    ) -> Observation {
        let method = match Method::from_bytes(method.as_bytes()) {
            Ok(method) => method,
            Err(error) => return Observation::Fatal(format!("Invalid HTTP method {}: {}", method, error)),
        };

        let response = self.client
            .request(method, url)
            .timeout(timeout)
            .send()
            .await;

        return match response {
            Ok(response) => {
                let status = response.status().as_u16();
                trace!("{} answered with HTTP {}", url, status);

                if status_accepted(accepted_statuses, status) {
                    Observation::Passed(format!("HTTP {}", status))
                } else {
                    Observation::Failed(format!("HTTP {}", status))
                }
            },
            Err(error) if error.is_builder() => {
                Observation::Fatal(format!("Cannot build request for {}: {}", url, error))
            },
            Err(error) if error.is_timeout() => {
                Observation::Failed(format!("request to {} timed out after {:?}", url, timeout))
            },
            Err(error) => Observation::Failed(format!("request to {} failed: {}", url, error)),
        };
    }
}


#[async_trait]
impl Checker for NetworkChecker {
    async fn check(&self, target: &TargetCheck, timeout: Duration) -> Observation {
        return match target {
            TargetCheck::PortListening { host, port } => self.check_port_listening(host, *port, timeout).await,
            TargetCheck::PortClosed { host, port } => self.check_port_closed(host, *port, timeout).await,
            TargetCheck::Http { method, url, accepted_statuses } => {
                self.check_http(method, url, accepted_statuses, timeout).await
            },
            TargetCheck::PidFile { path } => check_pid_file(path).await,
            TargetCheck::Command { executable, arguments } => {
                check_command(executable.clone(), arguments.clone(), timeout).await
            },
            TargetCheck::Composite(_) => {
                Observation::Fatal(String::from("Composite checks must be split into leaves before checking"))
            },
        };
    }
}


/// A refused connection is the only definite sign that nothing listens on the port.
async fn connect(host: &str, port: u16, timeout: Duration) -> Connection {
    return match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => Connection::Accepted,
        Ok(Err(error)) if error.kind() == ErrorKind::ConnectionRefused => Connection::Refused,
        Ok(Err(error)) => Connection::Unavailable(format!("connect to {}:{} failed: {}", host, port, error)),
        Err(_) => Connection::Unavailable(format!("connect to {}:{} timed out after {:?}", host, port, timeout)),
    };
}
