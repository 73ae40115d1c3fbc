use super::render::{init_logging, print_help, print_stdout, print_version, report};
use super::setup::{get_version, parse_action, Action};
use bump::api::BumpApi;
use bump::config::BumpConfig;
use bump::error::Result;
use bump::store::fs::FileStore;
use chrono::Utc;
use tracing::info;

pub fn run() -> Result<()> {
    match parse_action(std::env::args_os())? {
        Action::Help => print_help(),
        Action::Version => print_version(),
        Action::Run(config) => handle_run(&config),
    }
}

fn handle_run(config: &BumpConfig) -> Result<()> {
    init_logging(config.verbose);
    info!("bump {}", get_version());

    let mut api = BumpApi::new(FileStore::new());
    let result = api.run(config, Utc::now())?;
    report(&result);

    if let Some(text) = &result.stdout {
        print_stdout(text)?;
    }
    Ok(())
}
