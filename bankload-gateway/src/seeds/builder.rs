use super::plan::{SeedAccountsPlan, SeedsPlan};
use super::result::{SeedAccountResult, SeedCardResult, SeedOperationResult, SeedUserResult, SeedsResult};
use crate::error::GatewayError;
use crate::schema::accounts::AccountType;
use crate::schema::cards::CardType;
use crate::schema::operations::OperationType;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum SeedsError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Account {account_id} has planned operations but no card")]
    MissingCard { account_id: String },
}

/// Account as returned by the open-account call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenedAccount {
    pub account_id: String,
    /// Cards issued together with the account, if any.
    pub card_ids: Vec<String>,
}

/// Calls the builder needs from a transport. Each returns the id of what it
/// created.
pub trait SeedsGateway: Send + Sync {
    fn create_user(&self) -> impl Future<Output = Result<String, GatewayError>> + Send;

    fn open_account(
        &self,
        kind: AccountType,
        user_id: &str,
    ) -> impl Future<Output = Result<OpenedAccount, GatewayError>> + Send;

    fn issue_card(
        &self,
        kind: CardType,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;

    fn make_operation(
        &self,
        kind: OperationType,
        account_id: &str,
        card_id: &str,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;
}

/// Creates the fixtures described by a [`SeedsPlan`] through a gateway.
///
/// Calls are made one after the other; the first failure aborts the build.
#[derive(Clone, Debug)]
pub struct SeedsBuilder<G> {
    gateway: G,
}

impl<G: SeedsGateway> SeedsBuilder<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    #[instrument(name = "seeds", skip_all, fields(users = plan.users.count))]
    pub async fn build(&self, plan: &SeedsPlan) -> Result<SeedsResult, SeedsError> {
        let mut users = Vec::with_capacity(plan.users.count);
        for index in 0..plan.users.count {
            let user = self.build_user(plan).await?;
            info!("Seeded user {}/{}: {}", index + 1, plan.users.count, user.user_id);
            users.push(user);
        }
        Ok(SeedsResult::new(users))
    }

    async fn build_user(&self, plan: &SeedsPlan) -> Result<SeedUserResult, SeedsError> {
        let user_id = self.gateway.create_user().await?;
        debug!("Created user {user_id}");

        let plan = &plan.users;
        Ok(SeedUserResult {
            deposit_accounts: self
                .build_accounts(&user_id, AccountType::Deposit, &plan.deposit_accounts)
                .await?,
            savings_accounts: self
                .build_accounts(&user_id, AccountType::Savings, &plan.savings_accounts)
                .await?,
            debit_card_accounts: self
                .build_accounts(&user_id, AccountType::DebitCard, &plan.debit_card_accounts)
                .await?,
            credit_card_accounts: self
                .build_accounts(&user_id, AccountType::CreditCard, &plan.credit_card_accounts)
                .await?,
            user_id,
        })
    }

    async fn build_accounts(
        &self,
        user_id: &str,
        kind: AccountType,
        plan: &SeedAccountsPlan,
    ) -> Result<Vec<SeedAccountResult>, SeedsError> {
        let mut accounts = Vec::with_capacity(plan.count);
        for _ in 0..plan.count {
            accounts.push(self.build_account(user_id, kind, plan).await?);
        }
        Ok(accounts)
    }

    async fn build_account(
        &self,
        user_id: &str,
        kind: AccountType,
        plan: &SeedAccountsPlan,
    ) -> Result<SeedAccountResult, SeedsError> {
        let opened = self.gateway.open_account(kind, user_id).await?;
        let account_id = opened.account_id;
        debug!("Opened {kind:?} account {account_id}");

        let physical_cards = self
            .issue_cards(CardType::Physical, user_id, &account_id, plan.physical_cards.count)
            .await?;
        let virtual_cards = self
            .issue_cards(CardType::Virtual, user_id, &account_id, plan.virtual_cards.count)
            .await?;

        let card_id = physical_cards
            .iter()
            .chain(&virtual_cards)
            .map(|card| card.card_id.clone())
            .chain(opened.card_ids)
            .next();
        let card_id = match card_id {
            Some(card_id) => card_id,
            None if plan.operation_count() == 0 => String::new(),
            None => return Err(SeedsError::MissingCard { account_id }),
        };

        let operations = [
            (OperationType::TopUp, plan.top_up_operations.count),
            (OperationType::Purchase, plan.purchase_operations.count),
            (OperationType::Transfer, plan.transfer_operations.count),
            (OperationType::CashWithdrawal, plan.cash_withdrawal_operations.count),
        ];
        let mut made: [Vec<SeedOperationResult>; 4] = Default::default();
        for ((kind, count), results) in operations.into_iter().zip(made.iter_mut()) {
            for _ in 0..count {
                let operation_id = self
                    .gateway
                    .make_operation(kind, &account_id, &card_id)
                    .await?;
                debug!("Made {kind:?} operation {operation_id}");
                results.push(SeedOperationResult { operation_id });
            }
        }
        let [top_up_operations, purchase_operations, transfer_operations, cash_withdrawal_operations] =
            made;

        Ok(SeedAccountResult {
            account_id,
            physical_cards,
            virtual_cards,
            top_up_operations,
            purchase_operations,
            transfer_operations,
            cash_withdrawal_operations,
        })
    }

    async fn issue_cards(
        &self,
        kind: CardType,
        user_id: &str,
        account_id: &str,
        count: usize,
    ) -> Result<Vec<SeedCardResult>, SeedsError> {
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            let card_id = self.gateway.issue_card(kind, user_id, account_id).await?;
            debug!("Issued {kind:?} card {card_id}");
            cards.push(SeedCardResult { card_id });
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::plan::SeedAccountsPlan;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<String>>,
        cards_with_account: bool,
        fail_on: Option<&'static str>,
    }

    impl RecordingGateway {
        fn record(&self, call: String) -> Result<String, GatewayError> {
            if self.fail_on.is_some_and(|prefix| call.starts_with(prefix)) {
                return Err(GatewayError::MissingField {
                    method: "test",
                    field: "id",
                });
            }
            let mut calls = self.calls.lock().unwrap();
            calls.push(call);
            Ok(format!("id-{}", calls.len()))
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SeedsGateway for RecordingGateway {
        async fn create_user(&self) -> Result<String, GatewayError> {
            self.record("create_user".to_string())
        }

        async fn open_account(
            &self,
            kind: AccountType,
            user_id: &str,
        ) -> Result<OpenedAccount, GatewayError> {
            let account_id = self.record(format!("open_account {kind:?} {user_id}"))?;
            let card_ids = if self.cards_with_account {
                vec![format!("{account_id}-bundled")]
            } else {
                vec![]
            };
            Ok(OpenedAccount {
                account_id,
                card_ids,
            })
        }

        async fn issue_card(
            &self,
            kind: CardType,
            _user_id: &str,
            account_id: &str,
        ) -> Result<String, GatewayError> {
            self.record(format!("issue_card {kind:?} {account_id}"))
        }

        async fn make_operation(
            &self,
            kind: OperationType,
            account_id: &str,
            card_id: &str,
        ) -> Result<String, GatewayError> {
            self.record(format!("make_operation {kind:?} {account_id} {card_id}"))
        }
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    #[ntest::timeout(5_000)]
    async fn follows_plan() {
        let plan = SeedsPlan::users(2)
            .with_deposit_accounts(SeedAccountsPlan::accounts(1))
            .with_credit_card_accounts(
                SeedAccountsPlan::accounts(1)
                    .with_virtual_cards(1)
                    .with_top_up_operations(2)
                    .with_purchase_operations(1),
            );
        let builder = SeedsBuilder::new(RecordingGateway::default());

        let result = builder.build(&plan).await.unwrap();

        assert_eq!(result.users.len(), 2);
        let user = &result.users[0];
        assert_eq!(user.user_id, "id-1");
        assert_eq!(user.deposit_accounts.len(), 1);
        assert!(user.savings_accounts.is_empty());
        let credit = &user.credit_card_accounts[0];
        assert_eq!(credit.virtual_cards.len(), 1);
        assert_eq!(credit.top_up_operations.len(), 2);
        assert_eq!(credit.purchase_operations.len(), 1);
        assert!(credit.transfer_operations.is_empty());

        let calls = builder.gateway().calls();
        assert_eq!(
            &calls[..7],
            [
                "create_user",
                "open_account Deposit id-1",
                "open_account CreditCard id-1",
                "issue_card Virtual id-3",
                "make_operation TopUp id-3 id-4",
                "make_operation TopUp id-3 id-4",
                "make_operation Purchase id-3 id-4",
            ]
        );
        assert_eq!(calls.len(), 14);
        assert!(logs_contain("Seeded user 2/2: id-8"));
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    #[ntest::timeout(5_000)]
    async fn falls_back_to_bundled_card() {
        let plan = SeedsPlan::users(1).with_debit_card_accounts(
            SeedAccountsPlan::accounts(1).with_cash_withdrawal_operations(1),
        );
        let builder = SeedsBuilder::new(RecordingGateway {
            cards_with_account: true,
            ..RecordingGateway::default()
        });

        builder.build(&plan).await.unwrap();

        assert_eq!(
            builder.gateway().calls().last().unwrap(),
            "make_operation CashWithdrawal id-2 id-2-bundled"
        );
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    #[ntest::timeout(5_000)]
    async fn operations_without_card_fail() {
        let plan = SeedsPlan::users(1)
            .with_savings_accounts(SeedAccountsPlan::accounts(1).with_transfer_operations(1));
        let builder = SeedsBuilder::new(RecordingGateway::default());

        let err = builder.build(&plan).await.unwrap_err();
        assert!(matches!(err, SeedsError::MissingCard { ref account_id } if account_id == "id-2"));
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    #[ntest::timeout(5_000)]
    async fn first_error_aborts() {
        let plan = SeedsPlan::users(3).with_deposit_accounts(SeedAccountsPlan::accounts(1));
        let builder = SeedsBuilder::new(RecordingGateway {
            fail_on: Some("open_account"),
            ..RecordingGateway::default()
        });

        let err = builder.build(&plan).await.unwrap_err();
        assert!(matches!(err, SeedsError::Gateway(_)));
        assert_eq!(builder.gateway().calls(), ["create_user"]);
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    #[ntest::timeout(5_000)]
    async fn empty_plan_builds_nothing() {
        let builder = SeedsBuilder::new(RecordingGateway::default());
        let result = builder.build(&SeedsPlan::default()).await.unwrap();
        assert!(result.users.is_empty());
        assert!(builder.gateway().calls().is_empty());
    }
}
