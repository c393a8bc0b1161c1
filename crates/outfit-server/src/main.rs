//! Outfit interceptor extension.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use outfit_server::config::{load_headers, Config};
use outfit_server::{replay, server};
use tracing::info;

#[derive(Parser)]
#[clap(name = "outfit-interceptor")]
#[clap(about = "Copy, combine and cycle room outfits from chat commands")]
struct Cli {
    /// Enable debug logging
    #[clap(short, long, global = true)]
    debug: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect to the extension host and intercept packets
    Serve {
        /// Host address (overrides OUTFIT_HOST_ADDR)
        #[clap(long)]
        host: Option<String>,

        /// TOML header map (overrides OUTFIT_HEADERS)
        #[clap(long)]
        headers: Option<PathBuf>,

        /// Delay between outfit-cycle steps in milliseconds
        #[clap(long)]
        cycle_interval_ms: Option<u64>,

        /// Bound of the seen-user cache
        #[clap(long)]
        seen_capacity: Option<usize>,
    },

    /// Run a scenario file offline and print the emitted messages
    Replay {
        /// Scenario file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env()?;

    match cli.command {
        Command::Serve {
            host,
            headers,
            cycle_interval_ms,
            seen_capacity,
        } => {
            if let Some(host) = host {
                config.host_addr = host;
            }
            if let Some(path) = headers {
                config.headers = load_headers(path)?;
            }
            if let Some(ms) = cycle_interval_ms {
                config.cycle_interval = Duration::from_millis(ms);
            }
            if let Some(n) = seen_capacity {
                config.seen_capacity = n;
            }

            info!(
                "starting outfit-interceptor (host = {}, cycle = {:?}, seen capacity = {})",
                config.host_addr, config.cycle_interval, config.seen_capacity
            );
            server::run(config).await
        }
        Command::Replay { file } => {
            let mut session = config.new_session();
            for line in replay::replay_file(&file, &mut session)? {
                println!("{}", line);
            }
            Ok(())
        }
    }
}
