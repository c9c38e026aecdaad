// ABOUTME: Entry point for the berth CLI application.
// ABOUTME: Parses arguments and dispatches to the configured container manager.

mod cli;

use berth::config::ManagerConfiguration;
use berth::connection::ConnectionHandle;
use berth::error::{Error, Result};
use berth::manager_for;
use berth::types::{ContainerSet, ResourceName};
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if !cli.config.exists() {
        return Err(Error::ConfigNotFound(cli.config));
    }
    let config = ManagerConfiguration::load(&cli.config)?;
    let handle = ConnectionHandle::build(&config)?;

    match cli.command {
        Commands::Check => {
            let engine = handle.engine();
            let auth = handle.auth_mode();
            manager_for(handle)?;
            println!("Engine: {engine}");
            println!("Auth: {auth}");
            Ok(())
        }
        Commands::Deploy { set, namespace } => {
            let content = std::fs::read_to_string(&set)?;
            let set = ContainerSet::from_yaml(&content)?;
            let manager = manager_for(handle)?;

            println!(
                "Deploying {} ({} container(s)) via {}",
                set.name,
                set.containers.len(),
                manager.engine()
            );
            let deployed = manager.setup_and_run_container_set(set, &namespace).await?;
            println!("Deployed container set: {}", deployed.name);
            Ok(())
        }
        Commands::Remove { id } => {
            let id = ResourceName::new(&id).map_err(|e| Error::InvalidArgument(e.to_string()))?;
            let manager = manager_for(handle)?;

            let status = manager.kill_and_remove_container_set(&id).await?;
            println!("Removed container set: {id} (status {status})");
            Ok(())
        }
    }
}
