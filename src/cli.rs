// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "skafos")]
#[command(about = "Deploy applications to Azure App Service and provision ARM templates")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON lines instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new skafos.yml configuration file
    Init {
        /// App Service application name
        #[arg(short, long)]
        app: Option<String>,

        /// Resource group the app lives in
        #[arg(short, long)]
        resource_group: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Deploy the application to App Service
    Deploy {
        /// Deploy to a named deployment slot instead of production
        #[arg(short, long)]
        slot: Option<String>,
    },

    /// Provision resources from the embedded ARM template and wait for completion
    Provision {
        /// Template parameter overrides as name=value pairs
        #[arg(short, long = "parameter")]
        parameters: Vec<String>,
    },

    /// Verify that the configured credentials can reach Azure
    Validate {
        /// Timeout for the validation call, in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
}
