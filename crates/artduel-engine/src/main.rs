use anyhow::{Context, Result};
use artduel_client::RelayClient;
use artduel_engine::{Competition, EngineConfig};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "artduel-run", about = "Run one generate-then-guess competition headlessly")]
struct Cli {
    /// Relay base URL
    #[arg(long, env = "ARTDUEL_RELAY_URL", default_value = "http://127.0.0.1:3701")]
    relay_url: String,

    #[command(flatten)]
    engine: EngineConfig,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
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
    info!("relay: {}", cli.relay_url);

    let client = RelayClient::new(&cli.relay_url);
    client
        .health_check()
        .await
        .with_context(|| format!("relay not reachable at {}", cli.relay_url))?;

    let competition = Competition::new(client, cli.engine);
    let summary = competition.start().await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Animal:  {}", summary.animal);
        println!("\n{}\n", summary.art);
        println!("Guess:   {}", summary.guess);
        println!("Time:    {:.2}s", summary.elapsed_secs);
        println!(
            "Result:  {}",
            if summary.matched { "correct" } else { "incorrect" }
        );
    }

    Ok(())
}
