pub mod config;
mod routes;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

use anyhow::Result;
use tokio::net::TcpListener;

pub use config::RelayConfig;
pub use routes::build_router;

pub async fn serve(listener: TcpListener, config: RelayConfig) -> Result<()> {
    let app = routes::build_router(config);
    axum::serve(listener, app).await?;
    Ok(())
}
