use std::fs;
use serde::Deserialize;

use crate::config::{Application, Probe};


#[derive(Deserialize, Debug)]
pub struct Configuration {
    application: Application,
    probes: Vec<Probe>,
}


impl Configuration {
    pub fn from_file(file_path: String) -> Result<Configuration, String> {
        return match fs::read_to_string(&file_path) {
            Ok(content) => {
                Configuration::from_string(content)
            },
            Err(error) => {
                Err(format!("Error reading configuration file {}: {}", file_path, error))
            }
        }
    }

    pub fn from_string(content: String) -> Result<Configuration, String> {
        let configuration: Configuration = match toml::from_str(&content) {
            Ok(configuration) => configuration,
            Err(error) => {
                return Err(format!("Error parsing configuration file: {}", error));
            }
        };

        if configuration.probes.is_empty() {
            return Err(String::from("Configuration does not define any probes"));
        }

        return Ok(configuration);
    }

    pub fn get_application(&self) -> &Application {
        return &self.application;
    }

    pub fn get_probes(&self) -> &Vec<Probe> {
        return &self.probes;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use tokio::time::Instant;
    use tsm_readiness::TargetCheck;
    use crate::config::LogLevel;

    fn sample_working_complete_conf() -> String {
        return String::from(
            r#"
                [application]
                log_level = "debug"

                [[probes]]
                name = "jenkins"
                interval_ms = 500
                max_attempts = 20
                deadline_s = 60
                timeout_ms = 250

                [[probes.checks]]
                kind = "port_listening"
                host = "127.0.0.1"
                port = 8080

                [[probes.checks]]
                kind = "http"
                url = "http://127.0.0.1:8080/job/test/config.xml"
                method = "get"
                accepted_statuses = [200, 404]

                [[probes]]
                name = "jenkins-stopped"
                max_attempts = 10

                [[probes.checks]]
                kind = "port_closed"
                port = 8080

                [[probes]]
                name = "jenkins-pid"
                deadline_s = 30

                [[probes.checks]]
                kind = "pid_file"
                path = "/var/run/jenkins.pid"

                [[probes]]
                name = "jenkins-cli"
                max_attempts = 3

                [[probes.checks]]
                kind = "command"
                executable = "curl"
                arguments = ["-f", "http://127.0.0.1:8080/login"]
            "#,
        );
    }

    fn sample_working_mandatory_only_conf() -> String {
        return String::from(
            r#"
                [application]

                [[probes]]
                name = "jenkins"

                [[probes.checks]]
                kind = "http"
                url = "http://127.0.0.1:8080/"
            "#,
        );
    }

    fn sample_unknown_kind_conf() -> String {
        return String::from(
            r#"
                [application]

                [[probes]]
                name = "jenkins"
                max_attempts = 3

                [[probes.checks]]
                kind = "netstat"
                port = 8080
            "#,
        );
    }

    #[test]
    fn from_string_should_work() {
        let configuration = Configuration::from_string(sample_working_complete_conf()).unwrap();

        assert_eq!(configuration.get_application().get_log_level(), LogLevel::Debug);
        assert_eq!(configuration.get_probes().len(), 4);
        assert_eq!(configuration.get_probes()[0].get_name(), "jenkins");
        assert_eq!(configuration.get_probes()[0].get_interval(), Duration::from_millis(500));
    }

    #[test]
    fn from_string_when_missing_optional_keys_should_work() {
        let configuration = Configuration::from_string(sample_working_mandatory_only_conf()).unwrap();
        let probe = &configuration.get_probes()[0];

        assert_eq!(configuration.get_application().get_log_level(), LogLevel::Info);
        assert_eq!(probe.get_interval(), Duration::from_secs(1));
        assert_eq!(probe.build_target(), TargetCheck::Http {
            method: String::from("GET"),
            url: String::from("http://127.0.0.1:8080/"),
            accepted_statuses: vec![],
        });
    }

    #[test]
    fn from_string_when_kind_unknown_should_return_error() {
        assert!(Configuration::from_string(sample_unknown_kind_conf()).is_err());
    }

    #[test]
    fn from_string_when_no_probes_should_return_error() {
        let content = String::from("probes = []\n\n[application]\n");

        assert!(Configuration::from_string(content).is_err());
    }

    #[test]
    fn build_target_should_keep_check_order() {
        let configuration = Configuration::from_string(sample_working_complete_conf()).unwrap();

        let target = configuration.get_probes()[0].build_target();

        assert_eq!(target, TargetCheck::Composite(vec![
            TargetCheck::port_listening("127.0.0.1", 8080),
            TargetCheck::http_get("http://127.0.0.1:8080/job/test/config.xml", vec![200, 404]),
        ]));
    }

    #[test]
    fn build_target_should_apply_defaults() {
        let configuration = Configuration::from_string(sample_working_complete_conf()).unwrap();
        let probes = configuration.get_probes();

        assert_eq!(probes[1].build_target(), TargetCheck::port_closed("localhost", 8080));
        assert_eq!(probes[2].build_target(), TargetCheck::pid_file(PathBuf::from("/var/run/jenkins.pid")));
        assert_eq!(probes[3].build_target(), TargetCheck::command(
            "curl",
            vec![String::from("-f"), String::from("http://127.0.0.1:8080/login")],
        ));
    }

    #[test]
    fn build_spec_should_work() {
        let configuration = Configuration::from_string(sample_working_complete_conf()).unwrap();
        let started = Instant::now();

        let spec = configuration.get_probes()[0].build_spec(started).unwrap();

        assert_eq!(spec.get_interval(), Duration::from_millis(500));
        assert_eq!(spec.get_max_attempts(), Some(20));
        assert_eq!(spec.get_deadline(), Some(started + Duration::from_secs(60)));
        assert_eq!(spec.get_attempt_timeout(), Some(Duration::from_millis(250)));
        assert!(spec.validate(started).is_ok());
    }

    #[test]
    fn build_spec_without_bound_should_not_validate() {
        let configuration = Configuration::from_string(sample_working_mandatory_only_conf()).unwrap();
        let started = Instant::now();

        let spec = configuration.get_probes()[0].build_spec(started).unwrap();

        assert!(spec.validate(started).is_err());
    }

    #[test]
    fn build_spec_when_deadline_out_of_range_should_return_error() {
        let content = String::from(
            r#"
                [application]

                [[probes]]
                name = "jenkins"
                deadline_s = 9223372036854775807

                [[probes.checks]]
                kind = "port_listening"
                port = 8080
            "#,
        );
        let configuration = Configuration::from_string(content).unwrap();

        assert!(configuration.get_probes()[0].build_spec(Instant::now()).is_err());
    }

    #[test]
    fn from_file_should_work() {
        let file = String::from("resources/tsm-waitready.toml");
        let configuration = Configuration::from_file(file).unwrap();

        assert_eq!(configuration.get_application().get_log_level(), LogLevel::Debug);
        assert_eq!(configuration.get_probes().len(), 2);
    }

    #[test]
    fn from_file_when_file_invalid_should_return_error() {
        let file = String::from("foo/bar/invalid.file");
        let configuration = Configuration::from_file(file);

        assert!(configuration.is_err());
    }
}
