use anyhow::{Context, Result};
use clap::Parser;
use std::net::IpAddr;
use std::num::NonZeroUsize;
use switchboard_server::{ServerConfig, serve};
use tracing_subscriber::EnvFilter;

/// WebSocket signaling relay between stream producers and consumers.
#[derive(Parser, Debug)]
#[command(name = "switchboard", version)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Queue depth between connections and the switchboard.
    #[arg(long, default_value = "100")]
    command_buffer: NonZeroUsize,

    /// Log filter, e.g. `info` or `switchboard_server=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log: String,
}

impl From<&Cli> for ServerConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            command_buffer: cli.command_buffer.get(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log).context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    serve(ServerConfig::from(&cli)).await
}
