mod cli;
mod error;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chamberlain_api::MyQClient;
use chamberlain_config::Config;
use chamberlain_core::{
    CURRENT_PROPERTY, DeviceApi, GarageDoorOpener, StateTranslator, TargetDoorState,
    TokioScheduler, TracingSink,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let path = cli
        .global
        .config
        .clone()
        .unwrap_or_else(chamberlain_config::config_path);
    let config = load(&path)?;
    let client = connect(&config, &path)?;

    match cli.command {
        Command::Run => serve(&config, &path, client).await,
        Command::Status => status(&config, &client).await,
        Command::Open => command(&config, &path, client, TargetDoorState::Open).await,
        Command::Close => command(&config, &path, client, TargetDoorState::Closed).await,
    }
}

fn load(path: &Path) -> Result<Config, CliError> {
    chamberlain_config::load_config(Some(path))
        .map_err(|e| CliError::config(path.display().to_string(), e))
}

fn connect(config: &Config, path: &Path) -> Result<MyQClient, CliError> {
    let client_config = config
        .client_config()
        .map_err(|e| CliError::config(path.display().to_string(), e))?;
    tracing::debug!(
        device_id = %client_config.device_id,
        url = %client_config.base_url,
        "client configured"
    );
    Ok(MyQClient::new(client_config)?)
}

/// Host the accessory until Ctrl-C.
async fn serve(config: &Config, path: &Path, client: MyQClient) -> Result<(), CliError> {
    let accessory_config = config
        .accessory_config()
        .map_err(|e| CliError::config(path.display().to_string(), e))?;

    let sink = Arc::new(TracingSink::new(accessory_config.name.clone()));
    let accessory = GarageDoorOpener::start(
        accessory_config,
        Arc::new(client),
        sink,
        Arc::new(TokioScheduler),
    )?;

    info!(accessory = %accessory.name(), "accessory running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    Ok(())
}

/// One-shot read of the current door position.
async fn status(config: &Config, client: &MyQClient) -> Result<(), CliError> {
    let code = DeviceApi::get_device_attribute(client, CURRENT_PROPERTY).await?;
    let state = StateTranslator::remote_to_current(code)?;
    println!("{}: {state}", config.name);
    Ok(())
}

/// One-shot target write through the accessory's command handler.
async fn command(
    config: &Config,
    path: &Path,
    client: MyQClient,
    target: TargetDoorState,
) -> Result<(), CliError> {
    let accessory_config = config
        .accessory_config()
        .map_err(|e| CliError::config(path.display().to_string(), e))?;

    let sink = Arc::new(TracingSink::new(accessory_config.name.clone()));
    let accessory = GarageDoorOpener::new(accessory_config, Arc::new(client), sink)?;
    accessory.set_target(target).await?;
    println!("{}: {target} requested", accessory.name());
    Ok(())
}
