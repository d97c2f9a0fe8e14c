//! Load scenarios against the gateway and the registry the CLI runs them from.
mod existing_user_get_documents;
mod existing_user_make_operations;
mod grpc_new_user_get_accounts;
mod new_user_get_accounts;
mod open_debit_card_account;

pub use existing_user_get_documents::ExistingUserGetDocuments;
pub use existing_user_make_operations::ExistingUserMakeOperations;
pub use grpc_new_user_get_accounts::GrpcNewUserGetAccounts;
pub use new_user_get_accounts::NewUserGetAccounts;
pub use open_debit_card_account::OpenDebitCardAccount;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::grpc::GrpcGateway;
use crate::http::HttpGateway;
use crate::seeds::{DumpError, SeedsBuilder, SeedsDumps, SeedsError, SeedsPlan, SeedsResult};
use bankload::prelude::*;
use bankload::ScenarioError;
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Seeds(#[from] SeedsError),

    #[error(transparent)]
    Dump(#[from] DumpError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("Scenario {0} declares no seeds plan, pass one with --plan")]
    NoSeedsPlan(&'static str),
}

/// Reason a virtual user of a seeded scenario could not start.
#[derive(Debug, Error)]
pub enum UserSetupError {
    #[error("No seeded users available")]
    NoSeededUsers,

    #[error("Seeded user {user_id} has no {what}")]
    MissingFixture { user_id: String, what: &'static str },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Transport {
    Http,
    Grpc,
}

/// Shared state of seeded scenarios: a gateway and the fixtures it will use.
#[derive(Clone, Debug)]
pub struct Seeded<G> {
    pub gateway: G,
    pub seeds: Arc<SeedsResult>,
}

impl<G> Seeded<G> {
    pub fn new(gateway: G, seeds: SeedsResult) -> Self {
        Self {
            gateway,
            seeds: Arc::new(seeds),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenarioKind {
    NewUserGetAccounts,
    GrpcNewUserGetAccounts,
    OpenDebitCardAccount,
    ExistingUserGetDocuments,
    ExistingUserMakeOperations,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 5] = [
        ScenarioKind::NewUserGetAccounts,
        ScenarioKind::GrpcNewUserGetAccounts,
        ScenarioKind::OpenDebitCardAccount,
        ScenarioKind::ExistingUserGetDocuments,
        ScenarioKind::ExistingUserMakeOperations,
    ];

    /// Name used in logs, statistics and seed dump file names.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::NewUserGetAccounts => "new_user_get_accounts",
            ScenarioKind::GrpcNewUserGetAccounts => "grpc_new_user_get_accounts",
            ScenarioKind::OpenDebitCardAccount => "open_debit_card_account",
            ScenarioKind::ExistingUserGetDocuments => "existing_user_get_documents",
            ScenarioKind::ExistingUserMakeOperations => "existing_user_make_operations",
        }
    }

    pub fn transport(&self) -> Transport {
        match self {
            ScenarioKind::GrpcNewUserGetAccounts | ScenarioKind::ExistingUserMakeOperations => {
                Transport::Grpc
            }
            _ => Transport::Http,
        }
    }

    /// Fixtures the scenario expects to find in its dump.
    pub fn seeds_plan(&self) -> Option<SeedsPlan> {
        match self {
            ScenarioKind::ExistingUserGetDocuments => Some(existing_user_get_documents::seeds_plan()),
            ScenarioKind::ExistingUserMakeOperations => {
                Some(existing_user_make_operations::seeds_plan())
            }
            _ => None,
        }
    }
}

/// Load shape of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadOptions {
    pub users: NonZeroUsize,
    pub spawn_rate: f64,
    pub duration: Option<Duration>,
    pub iterations: Option<u64>,
    pub tps: Option<NonZeroU32>,
    pub wait_time: WaitTime,
}

impl LoadOptions {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            users: bankload::core::DEFAULT_USERS,
            spawn_rate: bankload::core::DEFAULT_SPAWN_RATE,
            duration: None,
            iterations: None,
            tps: None,
            wait_time: config.wait_time,
        }
    }

    fn apply<S: ConfigurableScenario>(&self, scenario: S) -> S {
        let mut scenario = scenario
            .users(self.users)
            .spawn_rate(self.spawn_rate)
            .wait_time(self.wait_time);
        if let Some(duration) = self.duration {
            scenario = scenario.duration(duration);
        }
        if let Some(iterations) = self.iterations {
            scenario = scenario.iterations(iterations);
        }
        if let Some(tps) = self.tps {
            scenario = scenario.tps(tps);
        }
        scenario
    }
}

/// Runs `kind` against the gateway described by `config`.
///
/// Seeded scenarios load their dump first and fail if it is missing.
pub async fn run(
    kind: ScenarioKind,
    config: &GatewayConfig,
    options: &LoadOptions,
) -> Result<RunStatistics, RunError> {
    let name = kind.name();
    let stats = match kind {
        ScenarioKind::NewUserGetAccounts => {
            let scenario = Scenario::<NewUserGetAccounts>::new(name, HttpGateway::new(config)?);
            options.apply(scenario).await?
        }
        ScenarioKind::GrpcNewUserGetAccounts => {
            let scenario = Scenario::<GrpcNewUserGetAccounts>::new(name, GrpcGateway::new(config)?);
            options.apply(scenario).await?
        }
        ScenarioKind::OpenDebitCardAccount => {
            let scenario = Scenario::<OpenDebitCardAccount>::new(name, HttpGateway::new(config)?);
            options.apply(scenario).await?
        }
        ScenarioKind::ExistingUserGetDocuments => {
            let seeds = SeedsDumps::new(&config.dumps_dir).load(name)?;
            let context = Seeded::new(HttpGateway::new(config)?, seeds);
            let scenario = Scenario::<ExistingUserGetDocuments>::new(name, context);
            options.apply(scenario).await?
        }
        ScenarioKind::ExistingUserMakeOperations => {
            let seeds = SeedsDumps::new(&config.dumps_dir).load(name)?;
            let context = Seeded::new(GrpcGateway::new(config)?, seeds);
            let scenario = Scenario::<ExistingUserMakeOperations>::new(name, context);
            options.apply(scenario).await?
        }
    };
    Ok(stats)
}

/// Builds the fixtures of `kind` and dumps them for later runs.
///
/// `plan` and `transport` default to what the scenario declares.
pub async fn seed(
    kind: ScenarioKind,
    config: &GatewayConfig,
    plan: Option<SeedsPlan>,
    transport: Option<Transport>,
) -> Result<PathBuf, RunError> {
    let name = kind.name();
    let plan = plan
        .or_else(|| kind.seeds_plan())
        .ok_or(RunError::NoSeedsPlan(name))?;

    let transport = transport.unwrap_or_else(|| kind.transport());
    info!("Seeding {name} over {transport:?}");
    let result = match transport {
        Transport::Http => SeedsBuilder::new(HttpGateway::new(config)?).build(&plan).await?,
        Transport::Grpc => SeedsBuilder::new(GrpcGateway::new(config)?).build(&plan).await?,
    };

    Ok(SeedsDumps::new(&config.dumps_dir).save(&result, name)?)
}
