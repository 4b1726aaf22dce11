use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use minirc::client;
use minirc::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; the console and irc.log carry the
    // protocol traffic.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    client::run(config).await
}
