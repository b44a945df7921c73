use anyhow::Result;
use gate_config::GateConfig;
use gate_server::KioskServer;

pub async fn handle(config: GateConfig) -> Result<()> {
    let server = KioskServer::bind(config)?;

    // The accept loop blocks, so it runs off the async runtime's workers.
    tokio::task::spawn_blocking(move || server.run()).await?;

    Ok(())
}
