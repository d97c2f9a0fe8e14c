use anyhow::Context;
use bankload_gateway::scenarios::{self, LoadOptions, ScenarioKind, Transport};
use bankload_gateway::seeds::{SeedsDumps, SeedsPlan, SeedsResult};
use bankload_gateway::GatewayConfig;
use bankload_core::WaitTime;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use url::Url;

const DEFAULT_LOG_FILTER: &str = "bankload=info,bankload_gateway=info";

/// Load tests and fixtures for the banking demo gateway.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Overrides GATEWAY_HTTP_URL.
    #[arg(long, global = true)]
    http_url: Option<Url>,

    /// Overrides GATEWAY_GRPC_URL.
    #[arg(long, global = true)]
    grpc_url: Option<Url>,

    /// Overrides SEEDS_DUMPS_DIR.
    #[arg(long, global = true)]
    dumps_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the fixtures a scenario needs and dump their ids.
    Seed {
        #[arg(value_enum)]
        scenario: ScenarioKind,

        /// JSON seeds plan replacing the scenario's own.
        #[arg(long)]
        plan: Option<PathBuf>,

        #[arg(long, value_enum)]
        transport: Option<Transport>,
    },
    /// Run a load scenario and print its statistics.
    Run(RunArgs),
    /// Summarize the seed dump of a scenario.
    ShowSeeds {
        #[arg(value_enum)]
        scenario: ScenarioKind,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    #[arg(value_enum)]
    scenario: ScenarioKind,

    #[arg(short, long, default_value = "1")]
    users: NonZeroUsize,

    /// Users started per second.
    #[arg(short, long, default_value_t = 1.0)]
    spawn_rate: f64,

    /// e.g. `90s` or `5m`.
    #[arg(short, long, value_parser = humantime::parse_duration)]
    duration: Option<Duration>,

    /// Tasks run by each user before it stops.
    #[arg(short, long)]
    iterations: Option<u64>,

    /// Upper bound on transactions per second across all users.
    #[arg(long)]
    tps: Option<NonZeroU32>,

    /// Overrides LOAD_WAIT_TIME_MIN.
    #[arg(long, value_parser = humantime::parse_duration)]
    wait_min: Option<Duration>,

    /// Overrides LOAD_WAIT_TIME_MAX.
    #[arg(long, value_parser = humantime::parse_duration)]
    wait_max: Option<Duration>,

    /// Serve transaction metrics for Prometheus on this address.
    #[arg(long)]
    prometheus: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    FmtSubscriber::builder().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = GatewayConfig::from_env().context("invalid gateway configuration")?;
    if let Some(url) = cli.http_url {
        config.http.url = url;
    }
    if let Some(url) = cli.grpc_url {
        config.grpc.url = url;
    }
    if let Some(dir) = cli.dumps_dir {
        config.dumps_dir = dir;
    }

    match cli.command {
        Command::Seed {
            scenario,
            plan,
            transport,
        } => {
            let plan = plan.map(|path| read_plan(&path)).transpose()?;
            let path = scenarios::seed(scenario, &config, plan, transport).await?;
            info!("Seeds for {} written to {}", scenario.name(), path.display());
        }
        Command::Run(args) => {
            if let Some(addr) = args.prometheus {
                PrometheusBuilder::new()
                    .with_http_listener(addr)
                    .install()
                    .context("unable to start Prometheus exporter")?;
                info!("Serving metrics on {addr}");
            }

            let wait_time = WaitTime::between(
                args.wait_min.unwrap_or(config.wait_time.min()),
                args.wait_max.unwrap_or(config.wait_time.max()),
            )?;
            let options = LoadOptions {
                users: args.users,
                spawn_rate: args.spawn_rate,
                duration: args.duration,
                iterations: args.iterations,
                tps: args.tps,
                wait_time,
            };
            let stats = scenarios::run(args.scenario, &config, &options).await?;
            println!("{stats}");
        }
        Command::ShowSeeds { scenario } => {
            let result = SeedsDumps::new(&config.dumps_dir).load(scenario.name())?;
            print_seeds(scenario, &result);
        }
    }

    Ok(())
}

fn read_plan(path: &Path) -> anyhow::Result<SeedsPlan> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read plan {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid plan {}", path.display()))
}

fn print_seeds(scenario: ScenarioKind, result: &SeedsResult) {
    let accounts: Vec<_> = result.users.iter().flat_map(|user| user.accounts()).collect();
    let cards: usize = accounts
        .iter()
        .map(|account| account.physical_cards.len() + account.virtual_cards.len())
        .sum();
    let operations: usize = accounts
        .iter()
        .map(|account| {
            account.top_up_operations.len()
                + account.purchase_operations.len()
                + account.transfer_operations.len()
                + account.cash_withdrawal_operations.len()
        })
        .sum();

    println!("{}", scenario.name());
    println!("  users:      {}", result.users.len());
    println!("  accounts:   {}", accounts.len());
    println!("  cards:      {cards}");
    println!("  operations: {operations}");
}
