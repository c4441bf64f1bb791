use std::net::SocketAddr;

use anyhow::Result;
use artduel_relay::config::{self, RelayConfig};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "artduel-relay", about = "Credential-injecting relay for the art competition")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "ARTDUEL_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(long, env = "ARTDUEL_PORT", default_value_t = 3701)]
    port: u16,

    /// Upstream chat-completions endpoint
    #[arg(long, env = "ARTDUEL_UPSTREAM_URL", default_value = config::DEFAULT_UPSTREAM_URL)]
    upstream_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = RelayConfig::from_env(&cli.upstream_url);

    // Presence only; the key itself must never reach the logs.
    if config.has_credential() {
        info!("upstream credential loaded from NVIDIA_API_KEY");
    } else {
        info!("no NVIDIA_API_KEY set, forwarding will fail with a local fault");
    }

    let addr = SocketAddr::new(cli.bind.parse()?, cli.port);
    let listener = TcpListener::bind(addr).await?;
    info!("artduel-relay listening on http://{addr}");

    artduel_relay::serve(listener, config).await?;
    Ok(())
}
