mod utils;
use utils::*;

use bankload::core::WaitTime;
use bankload_gateway::scenarios::{self, LoadOptions, ScenarioKind, Transport};
use bankload_gateway::seeds::{SeedAccountsPlan, SeedsPlan};
use mock_gateway::MockConfig;
use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;
use url::Url;

fn options(test: &TestGateway, users: usize, iterations: u64) -> LoadOptions {
    LoadOptions {
        users: NonZeroUsize::new(users).unwrap(),
        spawn_rate: f64::INFINITY,
        iterations: Some(iterations),
        wait_time: WaitTime::constant(Duration::ZERO),
        ..LoadOptions::new(&test.config)
    }
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn new_user_get_accounts() {
    let test = spawn_gateway(MockConfig::default()).await;

    let stats = scenarios::run(
        ScenarioKind::NewUserGetAccounts,
        &test.config,
        &options(&test, 2, 50),
    )
    .await
    .unwrap();

    assert_eq!(stats.name, "new_user_get_accounts");
    assert_eq!(stats.error, 0);
    let created = stats.transaction("POST /api/v1/users").unwrap();
    assert!(created.success > 0);
    assert!(stats.total() <= 100);
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn open_debit_card_account() {
    let test = spawn_gateway(MockConfig::default()).await;

    let stats = scenarios::run(
        ScenarioKind::OpenDebitCardAccount,
        &test.config,
        &options(&test, 3, 4),
    )
    .await
    .unwrap();

    assert_eq!(stats.failed_users, 0);
    assert_eq!(stats.transaction("POST /api/v1/users").unwrap().success, 3);
    let opened = stats
        .transaction("POST /api/v1/accounts/open-debit-card-account")
        .unwrap();
    assert_eq!(opened.success, 12);
    assert_eq!(opened.error, 0);
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn existing_user_get_documents() {
    let test = spawn_gateway(MockConfig::default()).await;
    let plan = SeedsPlan::users(2)
        .with_deposit_accounts(SeedAccountsPlan::accounts(1))
        .with_savings_accounts(SeedAccountsPlan::accounts(1));
    scenarios::seed(
        ScenarioKind::ExistingUserGetDocuments,
        &test.config,
        Some(plan),
        None,
    )
    .await
    .unwrap();

    let stats = scenarios::run(
        ScenarioKind::ExistingUserGetDocuments,
        &test.config,
        &options(&test, 2, 5),
    )
    .await
    .unwrap();

    assert_eq!(stats.failed_users, 0);
    assert_eq!(stats.error, 0);
    assert_eq!(stats.success, 10);
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn seeded_users_without_accounts_fail_setup() {
    let test = spawn_gateway(MockConfig::default()).await;
    scenarios::seed(
        ScenarioKind::ExistingUserGetDocuments,
        &test.config,
        Some(SeedsPlan::users(1)),
        Some(Transport::Http),
    )
    .await
    .unwrap();

    let stats = scenarios::run(
        ScenarioKind::ExistingUserGetDocuments,
        &test.config,
        &options(&test, 2, 5),
    )
    .await
    .unwrap();

    assert_eq!(stats.failed_users, 2);
    assert_eq!(stats.total(), 0);
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn rate_limited_gateway_produces_errors() {
    let test = spawn_gateway(MockConfig {
        max_tps: NonZeroU32::new(5),
        ..MockConfig::default()
    })
    .await;

    let stats = scenarios::run(
        ScenarioKind::NewUserGetAccounts,
        &test.config,
        &options(&test, 2, 50),
    )
    .await
    .unwrap();

    assert!(stats.error > 0);
    assert!(stats.error_rate > 0.);
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn tps_cap_limits_the_run() {
    let test = spawn_gateway(MockConfig::default()).await;
    let options = LoadOptions {
        duration: Some(Duration::from_millis(1_000)),
        iterations: None,
        tps: NonZeroU32::new(20),
        ..options(&test, 4, 0)
    };

    let stats = scenarios::run(ScenarioKind::OpenDebitCardAccount, &test.config, &options)
        .await
        .unwrap();

    assert!(stats.total() <= 30, "{} transactions", stats.total());
    assert!(stats.total() > 0);
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn unreachable_grpc_gateway_counts_errors() {
    let mut test = spawn_gateway(MockConfig::default()).await;
    test.config.grpc.url = Url::parse("http://127.0.0.1:1").unwrap();
    test.config.grpc.timeout = Duration::from_millis(500);

    let stats = scenarios::run(
        ScenarioKind::GrpcNewUserGetAccounts,
        &test.config,
        &options(&test, 1, 60),
    )
    .await
    .unwrap();

    let created = stats
        .transaction("grpc UsersGatewayService/CreateUser")
        .unwrap();
    assert_eq!(created.success, 0);
    assert!(created.error > 0);
    assert!(stats.transaction("grpc AccountsGatewayService/GetAccounts").is_none());
}
