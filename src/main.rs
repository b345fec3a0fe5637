use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing::{debug, Level};

use web3_atlas::catalog::CatalogKind;
use web3_atlas::commands;
use web3_atlas::config::Config;
use web3_atlas::error::Result;
use web3_atlas::location::hub_list;

/// web3-atlas: location parsing and map clustering for the network dashboard
///
/// Examples:
///   atlas parse "San Francisco, USA" "Berlin"
///   atlas cluster markers.json --radius 60
///   atlas map profiles.json --seed 7
///   atlas catalog blockchains --add Sui
///   atlas serve --port 9000
#[derive(Parser)]
#[command(name = "atlas", version, about, long_about = None)]
struct Cli {
    /// Config file. Defaults to ~/.web3-atlas/config.json.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse free-text locations into coordinates.
    Parse {
        #[arg(required = true)]
        locations: Vec<String>,

        /// Seed for approximate placement (reproducible output).
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Cluster a JSON array of markers ({"location": {"lat", "lng"}, ...}).
    Cluster {
        /// Input file, or "-" for stdin.
        input: String,

        /// Cluster radius in pixel-equivalent units.
        #[arg(long)]
        radius: Option<f64>,
    },

    /// Parse and cluster a JSON array of profiles ({"location": "City, Country", ...}).
    Map {
        /// Input file, or "-" for stdin.
        input: String,

        #[arg(long)]
        radius: Option<f64>,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// List the built-in tech hubs.
    Hubs,

    /// Show a selectable option list (blockchains or platforms).
    Catalog {
        kind: CatalogKind,

        /// Extra entries for this invocation only.
        #[arg(long = "add")]
        add: Vec<String>,
    },

    /// Run the HTTP API.
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    debug!(?config, "loaded configuration");

    let output = match cli.command {
        Command::Parse { locations, seed } => {
            commands::to_pretty_json(&commands::parse(&locations, seed, &config))?
        }
        Command::Cluster { input, radius } => {
            let json = commands::read_input(&input)?;
            commands::to_pretty_json(&commands::cluster(&json, radius, &config)?)?
        }
        Command::Map { input, radius, seed } => {
            let json = commands::read_input(&input)?;
            commands::to_pretty_json(&commands::map(&json, radius, seed, &config)?)?
        }
        Command::Hubs => commands::to_pretty_json(&hub_list())?,
        Command::Catalog { kind, add } => {
            commands::to_pretty_json(&commands::catalog(kind, &add, &config))?
        }
        Command::Serve { host, port } => {
            commands::apply_server_overrides(&mut config, host, port)?;
            let runtime = tokio::runtime::Runtime::new()?;
            return runtime.block_on(web3_atlas::server::start(config));
        }
    };

    println!("{}", output);
    Ok(())
}
