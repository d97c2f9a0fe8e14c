mod utils;
use utils::*;

use bankload_gateway::http::HttpGateway;
use bankload_gateway::schema::accounts::AccountType;
use bankload_gateway::schema::cards::CardType;
use bankload_gateway::schema::operations::OperationType;
use bankload_gateway::GatewayError;
use mock_gateway::MockConfig;
use reqwest::StatusCode;
use std::num::NonZeroU32;

async fn gateway(mock: MockConfig) -> (TestGateway, HttpGateway) {
    let test = spawn_gateway(mock).await;
    let gateway = HttpGateway::new(&test.config).unwrap();
    (test, gateway)
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn create_then_get_user() {
    let (_test, gateway) = gateway(MockConfig::default()).await;

    let created = gateway.users.create_user().await.unwrap().user;
    let fetched = gateway.users.get_user(&created.id).await.unwrap().user;

    assert_eq!(created, fetched);
    assert!(fetched.email.contains('@'));
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn unknown_user_is_unexpected_status() {
    let (_test, gateway) = gateway(MockConfig::default()).await;

    let raw = gateway.users.get_user_api("missing").await.unwrap();
    assert_eq!(raw.status, StatusCode::NOT_FOUND);
    assert_eq!(raw.label, "GET /api/v1/users/{user_id}");

    let err = gateway.users.get_user("missing").await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::UnexpectedStatus { status: StatusCode::NOT_FOUND, .. }
    ));
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn opens_every_account_kind() {
    let (_test, gateway) = gateway(MockConfig::default()).await;
    let user = gateway.users.create_user().await.unwrap().user;

    let deposit = gateway.accounts.open_deposit_account(&user.id).await.unwrap();
    let savings = gateway.accounts.open_savings_account(&user.id).await.unwrap();
    let debit = gateway.accounts.open_debit_card_account(&user.id).await.unwrap();
    let credit = gateway.accounts.open_credit_card_account(&user.id).await.unwrap();

    assert_eq!(deposit.account.account_type, AccountType::Deposit);
    assert_eq!(savings.account.account_type, AccountType::Savings);
    assert_eq!(debit.account.cards.len(), 1);
    assert_eq!(credit.account.cards[0].card_type, CardType::Virtual);

    let accounts = gateway.accounts.get_accounts(&user.id).await.unwrap().accounts;
    assert_eq!(accounts.len(), AccountType::ALL.len());
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn issues_cards() {
    let (_test, gateway) = gateway(MockConfig::default()).await;
    let user = gateway.users.create_user().await.unwrap().user;
    let account = gateway
        .accounts
        .open_deposit_account(&user.id)
        .await
        .unwrap()
        .account;

    let physical = gateway
        .cards
        .issue_physical_card(&user.id, &account.id)
        .await
        .unwrap()
        .card;
    let virtual_card = gateway
        .cards
        .issue_virtual_card(&user.id, &account.id)
        .await
        .unwrap()
        .card;

    assert_eq!(physical.card_type, CardType::Physical);
    assert_eq!(virtual_card.card_type, CardType::Virtual);
    assert_eq!(physical.account_id, account.id);
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn makes_and_reads_operations() {
    let (_test, gateway) = gateway(MockConfig::default()).await;
    let user = gateway.users.create_user().await.unwrap().user;
    let account = gateway
        .accounts
        .open_credit_card_account(&user.id)
        .await
        .unwrap()
        .account;
    let card_id = &account.cards[0].id;

    let mut made = Vec::new();
    for kind in OperationType::ALL {
        let operation = gateway
            .operations
            .make_operation(kind, &account.id, card_id)
            .await
            .unwrap()
            .operation;
        assert_eq!(operation.operation_type, kind);
        made.push(operation);
    }
    let purchase = made
        .iter()
        .find(|operation| operation.operation_type == OperationType::Purchase)
        .unwrap();
    assert!(!purchase.category.is_empty());

    let fetched = gateway
        .operations
        .get_operation(&made[0].id)
        .await
        .unwrap()
        .operation;
    assert_eq!(fetched, made[0]);

    let receipt = gateway
        .operations
        .get_operation_receipt(&made[0].id)
        .await
        .unwrap()
        .receipt;
    assert!(receipt.url.path().contains(&made[0].id));

    let listed = gateway
        .operations
        .get_operations(&account.id)
        .await
        .unwrap()
        .operations;
    assert_eq!(listed.len(), OperationType::ALL.len());

    let summary = gateway
        .operations
        .get_operations_summary(&account.id)
        .await
        .unwrap()
        .summary;
    let top_up = made[1].amount;
    assert_eq!(made[1].operation_type, OperationType::TopUp);
    assert!((summary.received_amount - top_up).abs() < 1e-9);
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn fetches_documents() {
    let (_test, gateway) = gateway(MockConfig::default()).await;
    let user = gateway.users.create_user().await.unwrap().user;
    let account = gateway
        .accounts
        .open_savings_account(&user.id)
        .await
        .unwrap()
        .account;

    let tariff = gateway
        .documents
        .get_tariff_document(&account.id)
        .await
        .unwrap()
        .tariff;
    let contract = gateway
        .documents
        .get_contract_document(&account.id)
        .await
        .unwrap()
        .contract;

    assert_ne!(tariff.url, contract.url);
    assert!(contract.document.contains(&account.id));

    let err = gateway
        .documents
        .get_tariff_document("missing")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::UnexpectedStatus { .. }));
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn rate_limited_gateway_answers_503() {
    let (_test, gateway) = gateway(MockConfig {
        max_tps: NonZeroU32::new(1),
        ..MockConfig::default()
    })
    .await;

    let mut statuses = Vec::new();
    for _ in 0..5 {
        statuses.push(gateway.users.get_user_api("anyone").await.unwrap().status);
    }

    assert!(statuses.contains(&StatusCode::SERVICE_UNAVAILABLE));
}
