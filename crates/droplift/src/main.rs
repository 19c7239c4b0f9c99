mod commands;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use droplift_api::{ApiClient, ClientConfig, ParamMode};

use commands::droplets::DropletCommands;
use commands::images::ImageCommands;
use commands::keys::KeyCommands;

#[derive(Parser)]
#[command(name = "droplift")]
#[command(version, about = "Manage droplets, images and SSH keys from the command line")]
struct Cli {
    /// Path to the INI settings file
    #[arg(short, long, env = "DROPLIFT_CONFIG", default_value = "settings.ini")]
    config: PathBuf,

    /// Percent-encode query parameter values instead of the legacy raw
    /// interpolation
    #[arg(long)]
    encode_params: bool,

    /// Request timeout in seconds (requests wait indefinitely unless set)
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage droplets
    Droplets {
        #[command(subcommand)]
        command: DropletCommands,
    },
    /// Manage images and snapshots
    Images {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// Manage SSH keys
    Keys {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// List available regions
    Regions,
    /// List available droplet sizes
    Sizes,
    /// Fetch the API documentation page
    Docs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = ClientConfig::from_file(&cli.config)?;
    let mut builder = ApiClient::builder(config);
    if cli.encode_params {
        builder = builder.param_mode(ParamMode::Encoded);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build()?;

    match cli.command {
        Commands::Droplets { command } => commands::droplets::handle(&client, command)?,
        Commands::Images { command } => commands::images::handle(&client, command)?,
        Commands::Keys { command } => commands::keys::handle(&client, command)?,
        Commands::Regions => commands::print_json(&client.list_regions()?)?,
        Commands::Sizes => commands::print_json(&client.list_sizes()?)?,
        Commands::Docs => println!("{}", client.documentation()?),
    }

    Ok(())
}
