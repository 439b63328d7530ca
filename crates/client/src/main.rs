mod cmd;
mod http;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cmd::{activities, images, machines, networks, ssh_keys};
use http::Api;

#[derive(Parser)]
#[command(name = "machina")]
#[command(bin_name = "machina")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CLI for a machinad instance", long_about = None)]
struct Cli {
    /// machinad endpoint
    #[arg(
        long,
        global = true,
        env = "MACHINA_ENDPOINT",
        default_value = "http://127.0.0.1:9876"
    )]
    endpoint: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage virtual machines
    Machines {
        #[clap(subcommand)]
        command: machines::MachinesCommand,
    },

    /// Manage ssh keys
    SshKeys {
        #[clap(subcommand)]
        command: ssh_keys::SshKeysCommand,
    },

    /// List base images
    Images {
        /// Print ids only
        #[arg(long)]
        ids: bool,
    },

    /// Manage virtual networks
    Networks {
        #[clap(subcommand)]
        command: networks::NetworksCommand,
    },

    /// List lifecycle activities
    Activities,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let api = Api::new(&cli.endpoint);

    match cli.command {
        Commands::Machines { command } => machines::run(&api, command).await,
        Commands::SshKeys { command } => ssh_keys::run(&api, command).await,
        Commands::Images { ids } => images::run(&api, ids).await,
        Commands::Networks { command } => networks::run(&api, command).await,
        Commands::Activities => activities::run(&api).await,
    }
}
