use std::process::exit;
use argparse::{ArgumentParser, Store};
use log::{debug, error};
use tsm_readiness::{CancellationToken, ReadinessProbe};

mod config;
mod report;
mod runner;

use config::Configuration;
use runner::Runner;


const EXIT_CONFIG_ERROR: i32 = 10;


struct CommandLineParameters {
    config_file: String,
}


fn parse_args_or_exit() -> CommandLineParameters {
    let mut config_file = String::new();

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Taschenmesser Readiness Waiter");
        ap.refer(&mut config_file)
            .add_option(&["-c", "--config"], Store, "Configuration file")
            .required();
        ap.parse_args_or_exit();
    }

    CommandLineParameters {
        config_file,
    }
}


fn init_config_or_exit(config_file: String) -> Configuration {
    match Configuration::from_file(config_file) {
        Ok(configuration) => {
            configuration
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(EXIT_CONFIG_ERROR);
        }
    }
}


fn init_logger(configuration: &Configuration) {
    let log_level = configuration.get_application().get_log_level();
    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV,
                                                   log_level.to_string());
    env_logger::init_from_env(env);
}


fn init_cancel_token_or_exit() -> CancellationToken {
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    let result = ctrlc::set_handler(move || {
        debug!("Interrupted, cancelling probes");
        cancel_clone.cancel();
    });

    if let Err(e) = result {
        error!("Error setting Ctrl-C handler: {}", e);
        exit(EXIT_CONFIG_ERROR);
    }

    return cancel;
}


#[tokio::main(flavor = "current_thread")]
async fn main() {
    let params = parse_args_or_exit();
    let configuration = init_config_or_exit(params.config_file);
    init_logger(&configuration);

    let cancel = init_cancel_token_or_exit();

    let readiness_probe = match ReadinessProbe::new() {
        Ok(readiness_probe) => readiness_probe,
        Err(e) => {
            error!("{}", e);
            exit(runner::EXIT_ERROR);
        }
    };

    let reports = Runner::run(&readiness_probe, configuration.get_probes(), cancel).await;
    report::print_reports(&reports);

    exit(Runner::exit_code(&reports));
}
