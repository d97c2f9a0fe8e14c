use anyhow::Context;
use mock_gateway::MockConfig;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use tracing_subscriber::FmtSubscriber;

const DEFAULT_ADDR: &str = "0.0.0.0:8003";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter("mock_gateway=info,tower_http=info")
        .init();

    let addr: SocketAddr = std::env::var("MOCK_GATEWAY_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("invalid MOCK_GATEWAY_ADDR")?;
    let max_tps = std::env::var("MOCK_GATEWAY_MAX_TPS")
        .ok()
        .map(|tps| tps.parse::<NonZeroU32>())
        .transpose()
        .context("invalid MOCK_GATEWAY_MAX_TPS")?;

    tokio::spawn(mock_gateway::tps_measure_task());
    mock_gateway::run(
        addr,
        MockConfig {
            max_tps,
            ..MockConfig::default()
        },
    )
    .await?;
    Ok(())
}
