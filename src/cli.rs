// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use berth::config::CONFIG_FILENAME;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "berth")]
#[command(about = "Deploy and tear down container sets on Docker or Kubernetes")]
#[command(version)]
pub struct Cli {
    /// Manager configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the manager and report the selected engine and authentication
    Check,

    /// Deploy a container set described in a YAML file
    Deploy {
        /// Container set file
        #[arg(short, long)]
        set: PathBuf,

        /// Namespace requested by the caller
        #[arg(short, long, default_value = "default")]
        namespace: String,
    },

    /// Remove a deployed container set
    Remove {
        /// Name of the container set
        id: String,
    },
}
