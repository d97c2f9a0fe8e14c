mod utils;
use utils::*;

use bankload_gateway::http::HttpGateway;
use bankload_gateway::scenarios::{self, ScenarioKind, Transport};
use bankload_gateway::seeds::{
    build_http_seeds_builder, SeedAccountsPlan, SeedsDumps, SeedsPlan,
};
use mock_gateway::MockConfig;

#[tokio::test]
#[ntest::timeout(10_000)]
async fn http_seeds_roundtrip() {
    let test = spawn_gateway(MockConfig::default()).await;
    let plan = SeedsPlan::users(2)
        .with_deposit_accounts(SeedAccountsPlan::accounts(1))
        .with_credit_card_accounts(
            SeedAccountsPlan::accounts(1)
                .with_physical_cards(1)
                .with_top_up_operations(2)
                .with_purchase_operations(1),
        );

    let result = build_http_seeds_builder(&test.config)
        .unwrap()
        .build(&plan)
        .await
        .unwrap();

    assert_eq!(result.users.len(), 2);
    let credit = &result.users[0].credit_card_accounts[0];
    assert_eq!(credit.physical_cards.len(), 1);
    assert_eq!(credit.top_up_operations.len(), 2);
    assert_eq!(credit.purchase_operations.len(), 1);

    let gateway = HttpGateway::new(&test.config).unwrap();
    let operations = gateway
        .operations
        .get_operations(&credit.account_id)
        .await
        .unwrap()
        .operations;
    assert_eq!(operations.len(), 3);
    assert!(operations
        .iter()
        .all(|operation| operation.card_id == credit.physical_cards[0].card_id));

    let dumps = SeedsDumps::new(&test.config.dumps_dir);
    dumps.save(&result, "smoke").unwrap();
    assert_eq!(dumps.load("smoke").unwrap(), result);
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn smoke_plan_roundtrip() {
    let test = spawn_gateway(MockConfig::default()).await;
    let plan = SeedsPlan::users(1)
        .with_credit_card_accounts(SeedAccountsPlan::accounts(1).with_physical_cards(1));

    let result = build_http_seeds_builder(&test.config)
        .unwrap()
        .build(&plan)
        .await
        .unwrap();

    assert_eq!(result.users.len(), 1);
    let user = &result.users[0];
    assert!(!user.user_id.is_empty());
    let accounts: Vec<_> = user.accounts().collect();
    assert_eq!(accounts.len(), 1);
    assert!(!accounts[0].account_id.is_empty());
    assert_eq!(accounts[0].physical_cards.len(), 1);
    assert!(accounts[0].virtual_cards.is_empty());
    assert!(!accounts[0].physical_cards[0].card_id.is_empty());

    let dumps = SeedsDumps::new(&test.config.dumps_dir);
    let path = dumps.save(&result, "smoke").unwrap();
    assert_eq!(path, test.config.dumps_dir.join("smoke_seeds.json"));
    assert!(path.is_file());
    assert_eq!(dumps.load("smoke").unwrap(), result);
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn operations_fall_back_to_account_card() {
    let test = spawn_gateway(MockConfig::default()).await;
    let plan = SeedsPlan::users(1).with_debit_card_accounts(
        SeedAccountsPlan::accounts(1).with_cash_withdrawal_operations(1),
    );

    let result = build_http_seeds_builder(&test.config)
        .unwrap()
        .build(&plan)
        .await
        .unwrap();

    let debit = &result.users[0].debit_card_accounts[0];
    assert!(debit.physical_cards.is_empty() && debit.virtual_cards.is_empty());
    assert_eq!(debit.cash_withdrawal_operations.len(), 1);
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn seeds_scenario_from_plan_file() {
    let test = spawn_gateway(MockConfig::default()).await;
    let plan: SeedsPlan = serde_json::from_value(serde_json::json!({
        "users": { "count": 3, "savings_accounts": { "count": 1 } }
    }))
    .unwrap();

    let path = scenarios::seed(
        ScenarioKind::ExistingUserGetDocuments,
        &test.config,
        Some(plan),
        Some(Transport::Http),
    )
    .await
    .unwrap();

    assert!(path.ends_with("existing_user_get_documents_seeds.json"));
    let result = SeedsDumps::new(&test.config.dumps_dir)
        .load("existing_user_get_documents")
        .unwrap();
    assert_eq!(result.users.len(), 3);
    assert!(result
        .users
        .iter()
        .all(|user| user.savings_accounts.len() == 1));
}
